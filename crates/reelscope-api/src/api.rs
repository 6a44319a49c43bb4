//! `MovieApi` trait definition.
#![allow(clippy::future_not_send)]

use tracing::instrument;

use crate::client::{ApiClient, Invocation};
use crate::error::ApiError;
use crate::types::{MovieDetails, MovieListPage};

/// Curated movie lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MovieList {
    /// Movies currently in theatres.
    NowPlaying,
    /// Movies ordered by popularity.
    Popular,
    /// Movies ordered by rating.
    TopRated,
    /// Movies being released soon.
    Upcoming,
}

impl MovieList {
    /// All lists in display order.
    pub const ALL: [Self; 4] = [Self::NowPlaying, Self::Popular, Self::TopRated, Self::Upcoming];

    /// Registry alias of the list endpoint.
    #[must_use]
    pub const fn alias(self) -> &'static str {
        match self {
            Self::NowPlaying => "movie-now-playing-list",
            Self::Popular => "movie-popular-list",
            Self::TopRated => "movie-top-rated-list",
            Self::Upcoming => "movieUpcomingList",
        }
    }

    /// Display title.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::NowPlaying => "Now Playing",
            Self::Popular => "Popular",
            Self::TopRated => "Top Rated",
            Self::Upcoming => "Upcoming",
        }
    }
}

/// Trending time window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TimeWindow {
    /// Last 24 hours.
    #[default]
    Day,
    /// Last 7 days.
    Week,
}

impl TimeWindow {
    /// Path value (`day` or `week`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
        }
    }
}

/// Typed movie operations.
///
/// Abstracts API operations for mock substitution in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(MovieApi: Send)]
pub trait LocalMovieApi {
    /// Fetches the details of a movie.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request, validation or decoding fails.
    async fn movie_details(&self, movie_id: u64, language: &str) -> Result<MovieDetails, ApiError>;

    /// Fetches one page of a curated movie list.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request, validation or decoding fails.
    async fn movie_list(
        &self,
        list: MovieList,
        page: u32,
        language: &str,
    ) -> Result<MovieListPage, ApiError>;

    /// Fetches trending movies.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request, validation or decoding fails.
    async fn trending_movies(
        &self,
        window: TimeWindow,
        language: &str,
    ) -> Result<MovieListPage, ApiError>;
}

impl LocalMovieApi for ApiClient {
    #[instrument(skip_all)]
    async fn movie_details(&self, movie_id: u64, language: &str) -> Result<MovieDetails, ApiError> {
        let invocation = Invocation::new()
            .param("movie_id", movie_id)
            .query("language", language);
        self.invoke_as("movie-details", invocation).await
    }

    #[instrument(skip_all)]
    async fn movie_list(
        &self,
        list: MovieList,
        page: u32,
        language: &str,
    ) -> Result<MovieListPage, ApiError> {
        let invocation = Invocation::new()
            .query("language", language)
            .query("page", page);
        self.invoke_as(list.alias(), invocation).await
    }

    #[instrument(skip_all)]
    async fn trending_movies(
        &self,
        window: TimeWindow,
        language: &str,
    ) -> Result<MovieListPage, ApiError> {
        let invocation = Invocation::new()
            .param("time_window", window.as_str())
            .query("language", language);
        self.invoke_as("trending-movies", invocation).await
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn client_for(server: &MockServer) -> ApiClient {
        ApiClient::builder()
            .base_url(server.uri().parse().unwrap())
            .lenient(true)
            .build()
            .unwrap()
    }

    #[test]
    fn test_list_aliases_are_registered() {
        // Arrange
        let registry = crate::registry::tmdb::registry().unwrap();

        // Act & Assert
        for list in MovieList::ALL {
            assert!(registry.get(list.alias()).is_some(), "{list:?}");
        }
    }

    #[tokio::test]
    async fn test_movie_details_via_http() {
        // Arrange
        let mock_server = MockServer::start().await;
        let json_body = include_str!("../../../fixtures/tmdb/movie_details_550.json");

        Mock::given(method("GET"))
            .and(path("/3/movie/550"))
            .and(query_param("language", "ja-JP"))
            .respond_with(ResponseTemplate::new(200).set_body_string(json_body))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);

        // Act
        let details = client.movie_details(550, "ja-JP").await.unwrap();

        // Assert
        assert_eq!(details.id, Some(550));
        assert_eq!(details.runtime, Some(139));
    }

    #[tokio::test]
    async fn test_movie_list_via_http() {
        // Arrange
        let mock_server = MockServer::start().await;
        let json_body = include_str!("../../../fixtures/tmdb/movie_top_rated.json");

        Mock::given(method("GET"))
            .and(path("/3/movie/top_rated"))
            .and(query_param("page", "3"))
            .and(query_param("language", "en-US"))
            .respond_with(ResponseTemplate::new(200).set_body_string(json_body))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);

        // Act
        let page = client
            .movie_list(MovieList::TopRated, 3, "en-US")
            .await
            .unwrap();

        // Assert
        assert_eq!(page.total_pages, Some(482));
        assert_eq!(page.results.len(), 3);
    }

    #[tokio::test]
    async fn test_trending_movies_via_http() {
        // Arrange
        let mock_server = MockServer::start().await;
        let json_body = include_str!("../../../fixtures/tmdb/trending_all_day.json");

        Mock::given(method("GET"))
            .and(path("/3/trending/movie/week"))
            .respond_with(ResponseTemplate::new(200).set_body_string(json_body))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);

        // Act
        let page = client
            .trending_movies(TimeWindow::Week, "en-US")
            .await
            .unwrap();

        // Assert
        assert_eq!(
            page.results.first().unwrap().media_type.as_deref(),
            Some("movie")
        );
    }
}
