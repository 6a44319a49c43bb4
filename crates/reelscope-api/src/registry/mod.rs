//! Declarative endpoint registry.
//!
//! Every operation the client can perform is described by an
//! [`EndpointDefinition`]: method, `:placeholder` path template, unique alias,
//! parameter specs and response shape. [`Registry::register`] checks the
//! definitions once at startup and freezes them into a lookup table.

pub mod tmdb;

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;
use reqwest::Method;

use crate::error::ApiError;
use crate::schema::Shape;

/// Matches `:name` placeholders in path templates.
#[allow(clippy::expect_used)]
static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r":([A-Za-z_][A-Za-z0-9_]*)").expect("failed to compile placeholder regex")
});

/// Returns placeholder names in template order.
#[must_use]
pub fn placeholders(template: &str) -> Vec<&str> {
    PLACEHOLDER
        .captures_iter(template)
        .filter_map(|c| c.get(1).map(|m| m.as_str()))
        .collect()
}

/// Replaces each `:name` placeholder with `value_for(name)`.
///
/// # Errors
///
/// Returns the name of the first placeholder `value_for` cannot resolve.
pub fn expand_template<F>(template: &str, mut value_for: F) -> Result<String, String>
where
    F: FnMut(&str) -> Option<String>,
{
    let mut expanded = String::with_capacity(template.len());
    let mut last = 0;
    for caps in PLACEHOLDER.captures_iter(template) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        expanded.push_str(template.get(last..whole.start()).unwrap_or_default());
        let value = value_for(name.as_str()).ok_or_else(|| String::from(name.as_str()))?;
        expanded.push_str(&value);
        last = whole.end();
    }
    expanded.push_str(template.get(last..).unwrap_or_default());
    Ok(expanded)
}

/// Where a parameter is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamLocation {
    /// Substituted into the path template.
    Path,
    /// Appended to the query string.
    Query,
}

impl ParamLocation {
    /// Lowercase name used in error paths.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Path => "path",
            Self::Query => "query",
        }
    }
}

/// Declared parameter of an endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSpec {
    /// Parameter name.
    pub name: String,
    /// Path or query.
    pub location: ParamLocation,
    /// Value shape (including the default, if any).
    pub shape: Shape,
    /// Query parameter explicitly marked optional.
    pub optional: bool,
}

impl ParameterSpec {
    /// Path parameter.
    #[must_use]
    pub fn path(name: impl Into<String>, shape: Shape) -> Self {
        Self {
            name: name.into(),
            location: ParamLocation::Path,
            shape,
            optional: false,
        }
    }

    /// Required query parameter (unless `shape` carries a default).
    #[must_use]
    pub fn query(name: impl Into<String>, shape: Shape) -> Self {
        Self {
            name: name.into(),
            location: ParamLocation::Query,
            shape,
            optional: false,
        }
    }

    /// Optional query parameter.
    #[must_use]
    pub fn optional_query(name: impl Into<String>, shape: Shape) -> Self {
        Self {
            optional: true,
            ..Self::query(name, shape)
        }
    }

    /// Path parameters are always required; query parameters unless optional
    /// or defaulted.
    #[must_use]
    pub const fn is_required(&self) -> bool {
        match self.location {
            ParamLocation::Path => true,
            ParamLocation::Query => !self.optional && self.shape.default_value().is_none(),
        }
    }
}

/// One registered operation.
#[derive(Debug, Clone, PartialEq)]
pub struct EndpointDefinition {
    /// HTTP method.
    pub method: Method,
    /// Path template such as `/3/movie/:movie_id`.
    pub path_template: String,
    /// Unique alias.
    pub alias: String,
    /// Declared parameters in declaration order.
    pub parameters: Vec<ParameterSpec>,
    /// Shape the response body is validated against.
    pub response: Shape,
    /// Human-readable summary.
    pub description: Option<String>,
}

impl EndpointDefinition {
    /// `GET` endpoint with no parameters and an `unknown` response shape.
    #[must_use]
    pub fn get(alias: impl Into<String>, path_template: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            path_template: path_template.into(),
            alias: alias.into(),
            parameters: Vec::new(),
            response: Shape::unknown(),
            description: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Appends a parameter.
    #[must_use]
    pub fn param(mut self, spec: ParameterSpec) -> Self {
        self.parameters.push(spec);
        self
    }

    /// Sets the response shape.
    #[must_use]
    pub fn response(mut self, shape: Shape) -> Self {
        self.response = shape;
        self
    }

    /// Parameters sent at `location`.
    pub fn parameters_at(&self, location: ParamLocation) -> impl Iterator<Item = &ParameterSpec> {
        self.parameters
            .iter()
            .filter(move |p| p.location == location)
    }

    fn check(&self) -> Result<(), ApiError> {
        let in_template: HashSet<&str> = placeholders(&self.path_template).into_iter().collect();

        for name in &in_template {
            if !self
                .parameters_at(ParamLocation::Path)
                .any(|p| p.name == *name)
            {
                return Err(ApiError::Configuration(format!(
                    "`{}`: path template `{}` references undeclared parameter `{name}`",
                    self.alias, self.path_template
                )));
            }
        }
        for spec in self.parameters_at(ParamLocation::Path) {
            if !in_template.contains(spec.name.as_str()) {
                return Err(ApiError::Configuration(format!(
                    "`{}`: path parameter `{}` does not appear in `{}`",
                    self.alias, spec.name, self.path_template
                )));
            }
        }
        Ok(())
    }
}

/// Immutable alias-keyed endpoint table.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    endpoints: Vec<EndpointDefinition>,
    by_alias: HashMap<String, usize>,
    by_route: HashMap<(Method, String), usize>,
}

impl Registry {
    /// Builds a registry from definitions.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Configuration`] when two definitions share an alias
    /// or a method + path template, or when a path template and its path
    /// parameters disagree.
    pub fn register<I>(definitions: I) -> Result<Self, ApiError>
    where
        I: IntoIterator<Item = EndpointDefinition>,
    {
        let mut registry = Self::default();
        for definition in definitions {
            definition.check()?;
            let index = registry.endpoints.len();
            if registry
                .by_alias
                .insert(definition.alias.clone(), index)
                .is_some()
            {
                return Err(ApiError::Configuration(format!(
                    "duplicate alias `{}`",
                    definition.alias
                )));
            }
            let route = (definition.method.clone(), definition.path_template.clone());
            if let Some(&first) = registry.by_route.get(&route) {
                let taken_by = registry
                    .endpoints
                    .get(first)
                    .map_or("", |d| d.alias.as_str());
                return Err(ApiError::Configuration(format!(
                    "`{}`: route {} {} is already registered as `{taken_by}`",
                    definition.alias, definition.method, definition.path_template
                )));
            }
            registry.by_route.insert(route, index);
            registry.endpoints.push(definition);
        }
        tracing::debug!(
            endpoints = registry.endpoints.len(),
            "Endpoint registry built"
        );
        Ok(registry)
    }

    /// Looks up a definition by alias.
    #[must_use]
    pub fn get(&self, alias: &str) -> Option<&EndpointDefinition> {
        self.by_alias
            .get(alias)
            .and_then(|&i| self.endpoints.get(i))
    }

    /// Alias registered for `method` + `path_template`.
    #[must_use]
    pub fn alias_for(&self, method: &Method, path_template: &str) -> Option<&str> {
        self.by_route
            .get(&(method.clone(), String::from(path_template)))
            .and_then(|&i| self.endpoints.get(i))
            .map(|d| d.alias.as_str())
    }

    /// Aliases in registration order.
    pub fn aliases(&self) -> impl Iterator<Item = &str> {
        self.endpoints.iter().map(|d| d.alias.as_str())
    }

    /// Number of registered endpoints.
    #[must_use]
    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn details() -> EndpointDefinition {
        EndpointDefinition::get("movie-details", "/3/movie/:movie_id")
            .param(ParameterSpec::path("movie_id", Shape::integer()))
    }

    #[test]
    fn test_placeholders_in_order() {
        // Arrange & Act
        let names = placeholders("/3/tv/:series_id/season/:season_number");

        // Assert
        assert_eq!(names, vec!["series_id", "season_number"]);
    }

    #[test]
    fn test_expand_template() {
        // Arrange
        let template = "/3/movie/:movie_id/keywords";

        // Act
        let expanded = expand_template(template, |name| {
            (name == "movie_id").then(|| String::from("550"))
        });
        let unresolved = expand_template(template, |_| None);

        // Assert
        assert_eq!(expanded.unwrap(), "/3/movie/550/keywords");
        assert_eq!(unresolved.unwrap_err(), "movie_id");
    }

    #[test]
    fn test_register_and_lookup() {
        // Arrange & Act
        let registry = Registry::register([details()]).unwrap();

        // Assert
        assert_eq!(registry.len(), 1);
        assert_eq!(
            registry.get("movie-details").unwrap().path_template,
            "/3/movie/:movie_id"
        );
        assert_eq!(
            registry.alias_for(&Method::GET, "/3/movie/:movie_id"),
            Some("movie-details")
        );
        assert!(registry.get("movie-credits").is_none());
    }

    #[test]
    fn test_duplicate_alias_is_rejected() {
        // Arrange
        let other = EndpointDefinition::get("movie-details", "/3/movie/latest");

        // Act
        let result = Registry::register([details(), other]);

        // Assert
        let err = result.unwrap_err();
        assert!(matches!(err, ApiError::Configuration(_)));
        assert!(err.to_string().contains("duplicate alias `movie-details`"));
    }

    #[test]
    fn test_duplicate_route_is_rejected() {
        // Arrange
        let first = EndpointDefinition::get("movie-popular-list", "/3/movie/popular");
        let second = EndpointDefinition::get("movie-popular", "/3/movie/popular");

        // Act
        let result = Registry::register([first, second]);

        // Assert
        let err = result.unwrap_err();
        let message = err.to_string();
        assert!(matches!(err, ApiError::Configuration(_)));
        assert!(message.contains("already registered as `movie-popular-list`"));
    }

    #[test]
    fn test_same_path_with_other_method_is_accepted() {
        // Arrange
        let read = EndpointDefinition::get("movie-rating", "/3/movie/:movie_id/rating")
            .param(ParameterSpec::path("movie_id", Shape::integer()));
        let mut write = read.clone();
        write.alias = String::from("movie-rating-add");
        write.method = Method::POST;

        // Act
        let registry = Registry::register([read, write]).unwrap();

        // Assert
        assert_eq!(
            registry.alias_for(&Method::GET, "/3/movie/:movie_id/rating"),
            Some("movie-rating")
        );
        assert_eq!(
            registry.alias_for(&Method::POST, "/3/movie/:movie_id/rating"),
            Some("movie-rating-add")
        );
    }

    #[test]
    fn test_undeclared_placeholder_is_rejected() {
        // Arrange
        let broken = EndpointDefinition::get("movie-credits", "/3/movie/:movie_id/credits");

        // Act
        let result = Registry::register([broken]);

        // Assert
        assert!(matches!(result, Err(ApiError::Configuration(_))));
    }

    #[test]
    fn test_path_parameter_missing_from_template_is_rejected() {
        // Arrange
        let broken = EndpointDefinition::get("movie-latest-id", "/3/movie/latest")
            .param(ParameterSpec::path("movie_id", Shape::integer()));

        // Act
        let result = Registry::register([broken]);

        // Assert
        assert!(matches!(result, Err(ApiError::Configuration(_))));
    }

    #[test]
    fn test_required_flags() {
        // Arrange
        let path = ParameterSpec::path("movie_id", Shape::integer());
        let query = ParameterSpec::query("external_source", Shape::one_of(["imdb_id"]));
        let optional = ParameterSpec::optional_query("region", Shape::string());
        let defaulted = ParameterSpec::optional_query("page", Shape::integer().with_default(1));

        // Act & Assert
        assert!(path.is_required());
        assert!(query.is_required());
        assert!(!optional.is_required());
        assert!(!defaulted.is_required());
    }
}
