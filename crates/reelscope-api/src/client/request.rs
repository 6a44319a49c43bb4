//! Invocation inputs and the request that middleware operates on.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::Method;
use reqwest::header::HeaderMap;
use serde_json::{Map, Value};
use url::Url;

use crate::error::ApiError;
use crate::registry::{EndpointDefinition, ParamLocation, expand_template};

/// Unreserved characters (RFC 3986) stay literal in path segments.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Inputs of a single operation call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Invocation {
    params: Map<String, Value>,
    queries: Map<String, Value>,
    body: Option<Value>,
}

impl Invocation {
    /// Creates an empty invocation.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a path parameter.
    #[must_use]
    pub fn param(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// Sets a query parameter.
    #[must_use]
    pub fn query(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.queries.insert(name.into(), value.into());
        self
    }

    /// Sets the JSON request body.
    #[must_use]
    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Supplied path parameters.
    #[must_use]
    pub const fn params(&self) -> &Map<String, Value> {
        &self.params
    }

    /// Supplied query parameters.
    #[must_use]
    pub const fn queries(&self) -> &Map<String, Value> {
        &self.queries
    }

    /// Request body, if any.
    #[must_use]
    pub const fn json_body(&self) -> Option<&Value> {
        self.body.as_ref()
    }
}

/// A fully resolved request, before it is sent.
///
/// Middleware receives it by value and returns it, possibly modified.
#[derive(Debug, Clone)]
pub struct PendingRequest {
    /// Alias of the operation being invoked.
    pub alias: String,
    /// HTTP method.
    pub method: Method,
    /// Absolute URL with path parameters and query string applied.
    pub url: Url,
    /// Request headers.
    pub headers: HeaderMap,
    /// JSON body.
    pub body: Option<Value>,
}

/// Builds the absolute URL for `definition`.
///
/// Declared query parameters come first in declaration order, followed by
/// undeclared ones. `null` values are skipped.
pub(super) fn build_url(
    base_url: &Url,
    definition: &EndpointDefinition,
    params: &Map<String, Value>,
    queries: &Map<String, Value>,
) -> Result<Url, ApiError> {
    let path = expand_template(&definition.path_template, |name| {
        params
            .get(name)
            .and_then(render)
            .map(|v| utf8_percent_encode(&v, PATH_SEGMENT).to_string())
    })
    .map_err(|name| {
        ApiError::Configuration(format!(
            "`{}`: unresolved path parameter `{name}` in `{}`",
            definition.alias, definition.path_template
        ))
    })?;

    let joined = format!("{}{path}", base_url.as_str().trim_end_matches('/'));
    let mut url = Url::parse(&joined)
        .map_err(|e| ApiError::Configuration(format!("invalid request URL `{joined}`: {e}")))?;

    let pairs = query_pairs(definition, queries);
    if !pairs.is_empty() {
        url.query_pairs_mut().extend_pairs(&pairs);
    }
    Ok(url)
}

fn query_pairs(
    definition: &EndpointDefinition,
    queries: &Map<String, Value>,
) -> Vec<(String, String)> {
    let declared: Vec<&str> = definition
        .parameters_at(ParamLocation::Query)
        .map(|p| p.name.as_str())
        .collect();
    let undeclared = queries
        .keys()
        .map(String::as_str)
        .filter(|name| !declared.contains(name));

    declared
        .iter()
        .copied()
        .chain(undeclared)
        .filter_map(|name| {
            queries
                .get(name)
                .and_then(render)
                .map(|v| (String::from(name), v))
        })
        .collect()
}

/// Renders a parameter value as text. Arrays are comma-joined.
fn render(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(_) | Value::Number(_) | Value::Object(_) => Some(value.to_string()),
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(render)
                .collect::<Vec<_>>()
                .join(","),
        ),
    }
}
