//! Movie listing view models.
//!
//! A failed request never fails the page: the error is logged and the
//! listing renders empty.

use reelscope_api::types::{MovieListPage, MovieSummary};
use reelscope_api::{LocalMovieApi, MovieList, TimeWindow};

use crate::config::MediaConfig;
use crate::media::{detail_href, image_url};

/// One tile of a movie grid.
#[derive(Debug, Clone, PartialEq)]
pub struct MovieCard {
    /// TMDB movie ID.
    pub id: u64,
    /// Original title, falling back to the localized one.
    pub title: String,
    /// Release date (YYYY-MM-DD).
    pub release_date: Option<String>,
    /// Backdrop image, falling back to the poster.
    pub image_url: Option<String>,
    /// Vote average.
    pub vote_average: Option<f64>,
    /// Detail page link.
    pub href: String,
}

impl MovieCard {
    /// Builds a card from a list entry. Entries without an ID are skipped.
    #[must_use]
    pub fn from_summary(summary: &MovieSummary, media: &MediaConfig) -> Option<Self> {
        let id = summary.id?;
        let title = summary
            .original_title
            .as_ref()
            .or(summary.title.as_ref())
            .cloned()
            .unwrap_or_default();
        let image = summary
            .backdrop_path
            .as_deref()
            .or(summary.poster_path.as_deref());

        Some(Self {
            id,
            title,
            release_date: summary.release_date.clone(),
            image_url: image_url(media, image),
            vote_average: summary.vote_average,
            href: detail_href(id),
        })
    }
}

/// Converts every usable entry of `page` into a card, keeping API order.
#[must_use]
pub fn cards(page: &MovieListPage, media: &MediaConfig) -> Vec<MovieCard> {
    page.results
        .iter()
        .filter_map(|summary| MovieCard::from_summary(summary, media))
        .collect()
}

/// Loads one page of a curated list.
///
/// Returns an empty listing when the request fails.
pub async fn load_listing(
    api: &(impl LocalMovieApi + Sync),
    media: &MediaConfig,
    list: MovieList,
    page: u32,
    language: &str,
) -> Vec<MovieCard> {
    match api.movie_list(list, page, language).await {
        Ok(response) => {
            let cards = cards(&response, media);
            tracing::debug!(
                list = list.alias(),
                page,
                count = cards.len(),
                "Movie list loaded"
            );
            cards
        }
        Err(e) => {
            tracing::warn!(list = list.alias(), page, error = %e, "Failed to load movie list");
            Vec::new()
        }
    }
}

/// Loads trending movies.
///
/// Returns an empty listing when the request fails.
pub async fn load_trending(
    api: &(impl LocalMovieApi + Sync),
    media: &MediaConfig,
    window: TimeWindow,
    language: &str,
) -> Vec<MovieCard> {
    match api.trending_movies(window, language).await {
        Ok(response) => cards(&response, media),
        Err(e) => {
            tracing::warn!(window = window.as_str(), error = %e, "Failed to load trending movies");
            Vec::new()
        }
    }
}
