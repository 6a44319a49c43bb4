//! Client bootstrap and the catalog facade.

use std::path::PathBuf;

use anyhow::{Context, Result};
use reelscope_api::{ApiClient, LocalMovieApi, MovieList, TimeWindow, auth};

use crate::config::{AppConfig, ENV_READ_ACCESS_TOKEN, MediaConfig, TmdbConfig, resolve_config_path};
use crate::detail::{MovieDetailView, load_detail};
use crate::listing::{MovieCard, load_listing, load_trending};

/// Builds an API client with the bearer auth plugin installed.
///
/// The token is resolved on every request: the configured token if set,
/// otherwise the `TMDB_READ_ACCESS_TOKEN` environment variable. A missing
/// token fails each request with a credential error rather than failing here.
///
/// # Errors
///
/// Returns an error if `base_url` is invalid or the HTTP client fails to build.
pub fn connect(config: &TmdbConfig) -> Result<ApiClient> {
    let base_url = config.base_url()?;
    let mut client = ApiClient::builder()
        .base_url(base_url)
        .options(config.validation.client_options())
        .build()
        .context("failed to build TMDB client")?;

    let configured = config.read_access_token.clone();
    auth::install(&mut client, move || {
        let token = configured
            .clone()
            .or_else(|| std::env::var(ENV_READ_ACCESS_TOKEN).ok())
            .filter(|t| !t.is_empty());
        async move {
            token.with_context(|| {
                format!("TMDB read access token is not configured (set {ENV_READ_ACCESS_TOKEN})")
            })
        }
    });

    tracing::debug!(
        base_url = %client.base_url(),
        validation = ?config.validation,
        "TMDB client ready"
    );
    Ok(client)
}

/// Data source for the listing and detail pages.
#[derive(Debug)]
pub struct Catalog<A = ApiClient> {
    api: A,
    media: MediaConfig,
    language: String,
}

impl Catalog {
    /// Loads the config file (plus environment overrides) and connects.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be loaded or the client fails to build.
    pub fn open(dir: Option<&PathBuf>) -> Result<Self> {
        let path = resolve_config_path(dir)?;
        let config = AppConfig::load_with_env(&path)?;
        tracing::debug!(path = %path.display(), "Config loaded");
        Self::from_config(&config)
    }

    /// Connects using an already loaded config.
    ///
    /// # Errors
    ///
    /// Returns an error if the client fails to build.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let api = connect(&config.tmdb)?;
        Ok(Self::with_api(api, config))
    }
}

impl<A: LocalMovieApi + Sync> Catalog<A> {
    /// Wraps an existing API implementation.
    pub fn with_api(api: A, config: &AppConfig) -> Self {
        Self {
            api,
            media: config.media.clone(),
            language: config.tmdb.language.clone(),
        }
    }

    /// Underlying API.
    pub const fn api(&self) -> &A {
        &self.api
    }

    /// One page of a curated list; empty on failure.
    pub async fn listing(&self, list: MovieList, page: u32) -> Vec<MovieCard> {
        load_listing(&self.api, &self.media, list, page, &self.language).await
    }

    /// Trending movies; empty on failure.
    pub async fn trending(&self, window: TimeWindow) -> Vec<MovieCard> {
        load_trending(&self.api, &self.media, window, &self.language).await
    }

    /// A movie detail page; `None` on failure or an invalid ID.
    pub async fn detail(&self, movie_id: &str) -> Option<MovieDetailView> {
        load_detail(&self.api, &self.media, movie_id, &self.language).await
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::config::Validation;

    fn config_for(server: &MockServer) -> AppConfig {
        let mut config = AppConfig::default();
        config.tmdb.base_url = server.uri();
        config.tmdb.read_access_token = Some(String::from("abc"));
        config
    }

    #[test]
    fn test_connect_rejects_invalid_base_url() {
        // Arrange
        let config = TmdbConfig {
            base_url: String::from("::"),
            ..TmdbConfig::default()
        };

        // Act
        let result = connect(&config);

        // Assert
        assert!(result.is_err());
    }

    #[test]
    fn test_connect_applies_validation_setting() {
        // Arrange
        let config = TmdbConfig {
            validation: Validation::Off,
            ..TmdbConfig::default()
        };

        // Act
        let client = connect(&config).unwrap();

        // Assert
        assert!(!client.options().validate);
        assert_eq!(client.middleware().len(), 1);
        assert_eq!(client.middleware()[0].name(), auth::MIDDLEWARE_NAME);
    }

    #[tokio::test]
    async fn test_catalog_listing_via_http() {
        // Arrange
        let mock_server = MockServer::start().await;
        let json_body = include_str!("../../../fixtures/tmdb/movie_top_rated.json");

        Mock::given(method("GET"))
            .and(path("/3/movie/top_rated"))
            .and(query_param("page", "1"))
            .and(query_param("language", "en-US"))
            .and(header("authorization", "Bearer abc"))
            .respond_with(ResponseTemplate::new(200).set_body_string(json_body))
            .expect(1)
            .mount(&mock_server)
            .await;

        let catalog = Catalog::from_config(&config_for(&mock_server)).unwrap();

        // Act
        let cards = catalog.listing(MovieList::TopRated, 1).await;

        // Assert
        assert_eq!(cards.len(), 3);
        assert_eq!(cards[1].title, "The Godfather");
        assert_eq!(cards[1].href, "/238");
    }

    #[tokio::test]
    async fn test_catalog_detail_via_http() {
        // Arrange
        let mock_server = MockServer::start().await;
        let json_body = include_str!("../../../fixtures/tmdb/movie_details_550.json");

        Mock::given(method("GET"))
            .and(path("/3/movie/550"))
            .and(header("authorization", "Bearer abc"))
            .respond_with(ResponseTemplate::new(200).set_body_string(json_body))
            .expect(1)
            .mount(&mock_server)
            .await;

        let catalog = Catalog::from_config(&config_for(&mock_server)).unwrap();

        // Act
        let view = catalog.detail("550").await.unwrap();

        // Assert
        assert_eq!(view.title, "Fight Club");
        assert_eq!(view.tagline.as_deref(), Some("Mischief. Mayhem. Soap."));
    }

    #[tokio::test]
    async fn test_catalog_degrades_on_http_error() {
        // Arrange
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401).set_body_string(
                r#"{"status_code":7,"status_message":"Invalid API key: You must be granted a valid key.","success":false}"#,
            ))
            .mount(&mock_server)
            .await;

        let catalog = Catalog::from_config(&config_for(&mock_server)).unwrap();

        // Act
        let cards = catalog.trending(TimeWindow::Week).await;
        let view = catalog.detail("550").await;

        // Assert
        assert!(cards.is_empty());
        assert!(view.is_none());
    }
}
