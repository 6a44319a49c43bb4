//! `AppConfig` struct, TOML loading and environment overrides.

use std::path::Path;

use anyhow::{Context, Result};
use reelscope_api::ClientOptions;
use reelscope_api::registry::tmdb::{DEFAULT_BASE_URL, DEFAULT_LANGUAGE};
use serde::Deserialize;
use url::Url;

/// Default image prefix; a TMDB image path is appended to it.
pub const DEFAULT_POSTER_PATH: &str = "https://image.tmdb.org/t/p/original";

/// Default IMDB title prefix; `/{imdb_id}` is appended to it.
pub const DEFAULT_IMDB_TITLE_PATH: &str = "https://www.imdb.com/title";

/// Overrides `tmdb.base_url`.
pub const ENV_BASE_URL: &str = "BASE_URL";

/// Overrides `tmdb.read_access_token`.
pub const ENV_READ_ACCESS_TOKEN: &str = "TMDB_READ_ACCESS_TOKEN";

/// Overrides `media.poster_path`.
pub const ENV_POSTER_PATH: &str = "POSTER_PATH";

/// Overrides `media.imdb_title_path`.
pub const ENV_IMDB_TITLE_PATH: &str = "IMDB_TITLE_PATH";

/// Top-level application configuration.
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// TMDB connection settings.
    #[serde(default)]
    pub tmdb: TmdbConfig,
    /// Media link settings.
    #[serde(default)]
    pub media: MediaConfig,
}

/// TMDB connection configuration.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TmdbConfig {
    /// API host; endpoint paths carry the `/3` prefix.
    pub base_url: String,
    /// v4 read access token sent as a bearer credential.
    pub read_access_token: Option<String>,
    /// Response validation posture.
    pub validation: Validation,
    /// `language` query value for every request.
    pub language: String,
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            base_url: String::from(DEFAULT_BASE_URL),
            read_access_token: None,
            validation: Validation::default(),
            language: String::from(DEFAULT_LANGUAGE),
        }
    }
}

impl TmdbConfig {
    /// Parses `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` is not an absolute URL.
    pub fn base_url(&self) -> Result<Url> {
        Url::parse(&self.base_url)
            .with_context(|| format!("invalid tmdb.base_url: {}", self.base_url))
    }
}

/// Response validation posture.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Validation {
    /// Reject responses whose present fields have the wrong type.
    Strict,
    /// Pass wrong-typed fields through (TMDB sends `null` for missing images).
    #[default]
    Lenient,
    /// Skip parameter and response validation entirely.
    Off,
}

impl Validation {
    /// Client options for this posture.
    #[must_use]
    pub const fn client_options(self) -> ClientOptions {
        match self {
            Self::Strict => ClientOptions {
                validate: true,
                lenient: false,
            },
            Self::Lenient => ClientOptions {
                validate: true,
                lenient: true,
            },
            Self::Off => ClientOptions {
                validate: false,
                lenient: false,
            },
        }
    }
}

/// Media link configuration.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct MediaConfig {
    /// Prefix for poster and backdrop images.
    pub poster_path: String,
    /// Prefix for IMDB title pages.
    pub imdb_title_path: String,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            poster_path: String::from(DEFAULT_POSTER_PATH),
            imdb_title_path: String::from(DEFAULT_IMDB_TITLE_PATH),
        }
    }
}

impl AppConfig {
    /// Loads config from a TOML file. Returns default if file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Loads config from a TOML file, then applies environment overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_with_env(path: &Path) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Overrides settings with values from `lookup`. Empty values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        if let Some(v) = get(ENV_BASE_URL) {
            self.tmdb.base_url = v;
        }
        if let Some(v) = get(ENV_READ_ACCESS_TOKEN) {
            self.tmdb.read_access_token = Some(v);
        }
        if let Some(v) = get(ENV_POSTER_PATH) {
            self.media.poster_path = v;
        }
        if let Some(v) = get(ENV_IMDB_TITLE_PATH) {
            self.media.imdb_title_path = v;
        }
    }
}
