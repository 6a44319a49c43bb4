//! Movie listing and detail view models for the reelscope front-end.
//!
//! Loads the configuration, connects an authenticated [`reelscope_api::ApiClient`]
//! and turns API responses into view models. Failed requests degrade to an
//! empty listing or a missing detail page instead of propagating.

/// Application configuration.
pub mod config;

/// Movie detail view model.
pub mod detail;

/// Movie listing view models.
pub mod listing;

/// Image and IMDB link building.
pub mod media;

/// Client bootstrap and catalog facade.
pub mod session;

/// Tracing initialisation.
pub mod telemetry;

pub use config::AppConfig;
pub use detail::MovieDetailView;
pub use listing::MovieCard;
pub use session::{Catalog, connect};
pub use telemetry::init_tracing;
