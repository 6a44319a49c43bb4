//! Error taxonomy for registry construction and request dispatch.

use super::types::TmdbErrorResponse;

/// A value or parameter did not match its declared shape.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("validation failed at `{path}`: expected {expected}, got {actual}")]
#[allow(clippy::module_name_repetitions)]
pub struct ValidationError {
    /// Location of the offending value (`$.results[0].id`, `query.page`, ...).
    pub path: String,
    /// Description of the declared shape.
    pub expected: String,
    /// Description of the value that was found.
    pub actual: String,
}

impl ValidationError {
    /// Creates a new validation error.
    #[must_use]
    pub fn new(
        path: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}

/// Errors surfaced by the API client.
///
/// Every failure reaches the immediate caller; nothing is retried.
#[derive(Debug, thiserror::Error)]
#[allow(clippy::module_name_repetitions)]
pub enum ApiError {
    /// The endpoint registry is malformed (duplicate alias, unresolved placeholder).
    #[error("configuration error: {0}")]
    Configuration(String),

    /// No endpoint is registered under the requested alias.
    #[error("unknown alias: {0}")]
    UnknownAlias(String),

    /// Parameters or the response body failed their declared shape.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The remote service answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Raw response body, untouched by validation.
        body: String,
    },

    /// The token provider failed before the request was sent.
    #[error("credential provider failed: {0}")]
    Credential(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The request could not be sent or the response could not be read.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body was not valid JSON or did not fit the requested model.
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// Returns the HTTP status code for [`ApiError::Http`].
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Parses the body of an [`ApiError::Http`] as a TMDB error payload.
    ///
    /// Returns `None` for other variants or when the body is not a TMDB error.
    #[must_use]
    pub fn tmdb_error(&self) -> Option<TmdbErrorResponse> {
        match self {
            Self::Http { body, .. } => serde_json::from_str(body).ok(),
            _ => None,
        }
    }
}
