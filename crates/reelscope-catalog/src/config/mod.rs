//! Application configuration module.
//!
//! Manages the TOML config file holding the TMDB connection settings and
//! the media link prefixes, with environment variable overrides.

#[allow(clippy::module_inception)]
mod config;
mod paths;

#[allow(clippy::module_name_repetitions)]
pub use config::{AppConfig, MediaConfig, TmdbConfig, Validation};
pub use config::{
    DEFAULT_IMDB_TITLE_PATH, DEFAULT_POSTER_PATH, ENV_BASE_URL, ENV_IMDB_TITLE_PATH,
    ENV_POSTER_PATH, ENV_READ_ACCESS_TOKEN,
};
pub use paths::{ENV_CONFIG_DIR, resolve_config_path, resolve_config_path_with};
