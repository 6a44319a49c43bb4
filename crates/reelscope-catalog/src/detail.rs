//! Movie detail view model.

use reelscope_api::LocalMovieApi;
use reelscope_api::types::MovieDetails;

use crate::config::MediaConfig;
use crate::media::{image_url, imdb_url};

/// Everything a movie detail page shows.
#[derive(Debug, Clone, PartialEq)]
pub struct MovieDetailView {
    /// TMDB movie ID.
    pub id: u64,
    /// Original title, falling back to the localized one.
    pub title: String,
    /// Release date (YYYY-MM-DD).
    pub release_date: Option<String>,
    /// Tagline.
    pub tagline: Option<String>,
    /// Genre names in API order.
    pub genres: Vec<String>,
    /// Overview text (may contain HTML).
    pub overview: Option<String>,
    /// Runtime in minutes.
    pub runtime: Option<u32>,
    /// Full-size backdrop image.
    pub backdrop_url: Option<String>,
    /// IMDB title page.
    pub imdb_url: Option<String>,
}

impl MovieDetailView {
    /// Builds the view from a details response. `id` is the requested ID.
    #[must_use]
    pub fn from_details(id: u64, details: &MovieDetails, media: &MediaConfig) -> Self {
        let image = details
            .backdrop_path
            .as_deref()
            .or(details.poster_path.as_deref());
        Self {
            id: details.id.unwrap_or(id),
            title: details
                .original_title
                .as_ref()
                .or(details.title.as_ref())
                .cloned()
                .unwrap_or_default(),
            release_date: details.release_date.clone(),
            tagline: details.tagline.clone().filter(|t| !t.is_empty()),
            genres: details
                .genres
                .iter()
                .filter_map(|g| g.name.clone())
                .collect(),
            overview: details.overview.clone().filter(|o| !o.is_empty()),
            runtime: details.runtime.filter(|&r| r > 0),
            backdrop_url: image_url(media, image),
            imdb_url: imdb_url(media, details.imdb_id.as_deref()),
        }
    }
}

/// Parses a movie ID taken from a route segment.
#[must_use]
pub fn parse_movie_id(raw: &str) -> Option<u64> {
    raw.trim().parse().ok()
}

/// Loads a movie detail page.
///
/// Returns `None` when `movie_id` is not a valid ID or the request fails.
pub async fn load_detail(
    api: &(impl LocalMovieApi + Sync),
    media: &MediaConfig,
    movie_id: &str,
    language: &str,
) -> Option<MovieDetailView> {
    let Some(id) = parse_movie_id(movie_id) else {
        tracing::warn!(movie_id, "Invalid movie ID");
        return None;
    };

    match api.movie_details(id, language).await {
        Ok(details) => Some(MovieDetailView::from_details(id, &details, media)),
        Err(e) => {
            tracing::warn!(movie_id = id, error = %e, "Failed to load movie details");
            None
        }
    }
}
