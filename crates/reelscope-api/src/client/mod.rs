//! `ApiClient` - registry-driven API client.
//!
//! Every alias in the [`Registry`] becomes an operation. An invocation
//! validates its parameters, fills in the path template and query string,
//! runs the request middleware, sends the request and validates the response
//! body against the endpoint's declared shape.

mod middleware;
mod request;

use std::sync::Arc;

use reqwest::Client;
use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::instrument;
use url::Url;

pub use middleware::{Middleware, RequestHook};
pub use request::{Invocation, PendingRequest};

use crate::error::ApiError;
use crate::registry::{EndpointDefinition, ParamLocation, Registry, tmdb};
use crate::schema::{ValidationMode, Validator};

/// User-Agent sent when none is configured.
const DEFAULT_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Validation behaviour of a client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::module_name_repetitions)]
pub struct ClientOptions {
    /// Validate parameters and response bodies (default: `true`).
    pub validate: bool,
    /// Pass wrong-typed response values through instead of failing.
    pub lenient: bool,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            validate: true,
            lenient: false,
        }
    }
}

impl ClientOptions {
    /// Validation mode applied to response bodies.
    #[must_use]
    pub const fn response_mode(&self) -> ValidationMode {
        if self.lenient {
            ValidationMode::Lenient
        } else {
            ValidationMode::Strict
        }
    }
}

/// Registry-driven API client.
#[derive(Debug, Clone)]
#[allow(clippy::module_name_repetitions)]
pub struct ApiClient {
    /// HTTP client.
    http_client: Client,
    /// Base URL the path templates are appended to.
    base_url: Url,
    /// Endpoint table.
    registry: Arc<Registry>,
    /// Validation options.
    options: ClientOptions,
    /// Request hooks in execution order.
    middleware: Vec<Middleware>,
}

/// Builder for `ApiClient`.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct ApiClientBuilder {
    base_url: Option<Url>,
    registry: Option<Arc<Registry>>,
    options: ClientOptions,
    user_agent: Option<String>,
}

impl ApiClientBuilder {
    /// Creates a new builder.
    fn new() -> Self {
        Self {
            base_url: None,
            registry: None,
            options: ClientOptions::default(),
            user_agent: None,
        }
    }

    /// Overrides the base URL (default: `https://api.themoviedb.org`).
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Overrides the endpoint table (default: the built-in TMDB table).
    #[must_use]
    pub fn registry(mut self, registry: impl Into<Arc<Registry>>) -> Self {
        self.registry = Some(registry.into());
        self
    }

    /// Enables or disables parameter and response validation.
    #[must_use]
    pub const fn validate(mut self, validate: bool) -> Self {
        self.options.validate = validate;
        self
    }

    /// Enables lenient response validation.
    #[must_use]
    pub const fn lenient(mut self, lenient: bool) -> Self {
        self.options.lenient = lenient;
        self
    }

    /// Replaces all validation options.
    #[must_use]
    pub const fn options(mut self, options: ClientOptions) -> Self {
        self.options = options;
        self
    }

    /// Sets the User-Agent.
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// - The built-in registry is inconsistent.
    /// - `reqwest::Client` build fails.
    pub fn build(self) -> Result<ApiClient, ApiError> {
        let base_url = if let Some(url) = self.base_url {
            url
        } else {
            Url::parse(tmdb::DEFAULT_BASE_URL)
                .map_err(|e| ApiError::Configuration(format!("invalid default base URL: {e}")))?
        };

        let registry = match self.registry {
            Some(registry) => registry,
            None => Arc::new(tmdb::registry()?),
        };

        let user_agent = self
            .user_agent
            .unwrap_or_else(|| String::from(DEFAULT_USER_AGENT));
        let http_client = Client::builder().user_agent(user_agent).gzip(true).build()?;

        Ok(ApiClient {
            http_client,
            base_url,
            registry,
            options: self.options,
            middleware: Vec::new(),
        })
    }
}

impl ApiClient {
    /// Creates a new builder.
    #[must_use]
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::new()
    }

    /// Base URL requests are sent to.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Validation options.
    #[must_use]
    pub const fn options(&self) -> ClientOptions {
        self.options
    }

    /// Endpoint table.
    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Registered aliases in registration order.
    pub fn aliases(&self) -> impl Iterator<Item = &str> {
        self.registry.aliases()
    }

    /// Appends a middleware. Middleware runs in insertion order.
    pub fn use_middleware(&mut self, middleware: Middleware) {
        tracing::debug!(middleware = middleware.name(), "Middleware installed");
        self.middleware.push(middleware);
    }

    /// Installed middleware in execution order.
    #[must_use]
    pub fn middleware(&self) -> &[Middleware] {
        &self.middleware
    }

    /// Returns the operation bound to `alias`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::UnknownAlias`] if no endpoint is registered under `alias`.
    pub fn operation(&self, alias: &str) -> Result<Operation<'_>, ApiError> {
        let definition = self.definition(alias)?;
        Ok(Operation {
            client: self,
            definition,
        })
    }

    /// Resolves an invocation into a request without sending it.
    ///
    /// Parameters are validated (and defaulted) unless validation is
    /// disabled, then substituted into the path template and query string.
    /// Middleware has not run on the result.
    ///
    /// # Errors
    ///
    /// - [`ApiError::UnknownAlias`] for an unregistered alias.
    /// - [`ApiError::Validation`] when a parameter fails its spec.
    /// - [`ApiError::Configuration`] when a path placeholder stays unresolved.
    pub fn prepare(
        &self,
        alias: &str,
        invocation: &Invocation,
    ) -> Result<PendingRequest, ApiError> {
        let definition = self.definition(alias)?;
        self.prepare_with(definition, invocation)
    }

    /// Invokes the operation registered under `alias`.
    ///
    /// Returns the validated response body, or the raw body when validation
    /// is disabled.
    ///
    /// # Errors
    ///
    /// - Any error of [`ApiClient::prepare`].
    /// - A middleware error ([`ApiError::Credential`] for the auth plugin).
    /// - [`ApiError::Transport`] when the request cannot be sent.
    /// - [`ApiError::Http`] on a non-success status.
    /// - [`ApiError::Decode`] when the body is not JSON.
    /// - [`ApiError::Validation`] when the body fails the response shape.
    #[instrument(skip_all, fields(alias = alias))]
    pub async fn invoke(&self, alias: &str, invocation: Invocation) -> Result<Value, ApiError> {
        let definition = self.definition(alias)?;
        self.dispatch(definition, &invocation).await
    }

    /// Invokes `alias` and deserializes the response into `T`.
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::invoke`]; a body that does not fit `T` is
    /// [`ApiError::Decode`].
    pub async fn invoke_as<T: DeserializeOwned>(
        &self,
        alias: &str,
        invocation: Invocation,
    ) -> Result<T, ApiError> {
        let value = self.invoke(alias, invocation).await?;
        Ok(serde_json::from_value(value)?)
    }

    fn definition(&self, alias: &str) -> Result<&EndpointDefinition, ApiError> {
        self.registry
            .get(alias)
            .ok_or_else(|| ApiError::UnknownAlias(String::from(alias)))
    }

    fn prepare_with(
        &self,
        definition: &EndpointDefinition,
        invocation: &Invocation,
    ) -> Result<PendingRequest, ApiError> {
        let url = if self.options.validate {
            // Parameters are always checked strictly; leniency only covers responses.
            let validator = Validator::new(ValidationMode::Strict);
            let params = validator.validate_parameters(
                definition.parameters_at(ParamLocation::Path),
                invocation.params(),
            )?;
            let queries = validator.validate_parameters(
                definition.parameters_at(ParamLocation::Query),
                invocation.queries(),
            )?;
            request::build_url(&self.base_url, definition, &params, &queries)?
        } else {
            request::build_url(
                &self.base_url,
                definition,
                invocation.params(),
                invocation.queries(),
            )?
        };

        Ok(PendingRequest {
            alias: definition.alias.clone(),
            method: definition.method.clone(),
            url,
            headers: HeaderMap::new(),
            body: invocation.json_body().cloned(),
        })
    }

    async fn dispatch(
        &self,
        definition: &EndpointDefinition,
        invocation: &Invocation,
    ) -> Result<Value, ApiError> {
        let mut pending = self.prepare_with(definition, invocation)?;
        for middleware in &self.middleware {
            tracing::trace!(middleware = middleware.name(), "Running request hook");
            pending = middleware.apply(pending).await?;
        }

        let PendingRequest {
            method,
            url,
            headers,
            body,
            ..
        } = pending;
        let mut builder = self.http_client.request(method, url).headers(headers);
        if let Some(body) = body {
            builder = builder.json(&body);
        }
        let request = builder.build()?;

        tracing::debug!(method = %request.method(), url = %request.url(), "TMDB API request");

        let response = self.http_client.execute(request).await?;
        let status = response.status();
        tracing::debug!(status = status.as_u16(), "TMDB API response");

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("<failed to read body>"));
            tracing::warn!(
                status = status.as_u16(),
                "TMDB API returned an error status"
            );
            return Err(ApiError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let value: Value = serde_json::from_str(&body)?;
        if !self.options.validate {
            return Ok(value);
        }
        let validator = Validator::new(self.options.response_mode());
        Ok(validator.validate(&definition.response, &value)?)
    }
}

/// An operation bound to one registered alias.
#[derive(Debug, Clone, Copy)]
pub struct Operation<'a> {
    client: &'a ApiClient,
    definition: &'a EndpointDefinition,
}

impl<'a> Operation<'a> {
    /// Endpoint definition behind this operation.
    #[must_use]
    pub const fn definition(&self) -> &'a EndpointDefinition {
        self.definition
    }

    /// Resolves an invocation without sending it.
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::prepare`].
    pub fn prepare(&self, invocation: &Invocation) -> Result<PendingRequest, ApiError> {
        self.client.prepare_with(self.definition, invocation)
    }

    /// Invokes the operation.
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::invoke`].
    #[instrument(skip_all, fields(alias = %self.definition.alias))]
    pub async fn call(&self, invocation: Invocation) -> Result<Value, ApiError> {
        self.client.dispatch(self.definition, &invocation).await
    }
}
