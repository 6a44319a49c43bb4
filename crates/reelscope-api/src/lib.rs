//! Schema-validated TMDB API client for reelscope.
//!
//! Operations are declared once in an endpoint [`registry`], validated by the
//! [`schema`] engine and dispatched by the registry-driven [`ApiClient`].
//! The [`auth`] plugin injects a bearer credential into every request.

/// Bearer-token auth plugin.
pub mod auth;

/// Typed movie operations.
pub mod api;

/// Registry-driven HTTP client.
pub mod client;

/// Error types.
pub mod error;

/// Endpoint registry.
pub mod registry;

/// Shape validation engine.
pub mod schema;

/// Typed response models.
pub mod types;

pub use api::{LocalMovieApi, MovieApi, MovieList, TimeWindow};
pub use client::{
    ApiClient, ApiClientBuilder, ClientOptions, Invocation, Middleware, PendingRequest,
};
pub use error::{ApiError, ValidationError};
pub use registry::{EndpointDefinition, ParamLocation, ParameterSpec, Registry};
pub use schema::{Shape, ValidationMode, Validator};
