//! Typed views over validated TMDB responses.
//!
//! Declared fields are all optional (the registry shapes are partial) and
//! undeclared fields land in `extra` (the registry shapes are passthrough).

use serde::Deserialize;
use serde_json::{Map, Value};

// --- Movie lists ---

/// Response from the movie list and trending endpoints.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MovieListPage {
    /// Current page number.
    pub page: Option<u32>,
    /// Page entries.
    #[serde(default)]
    pub results: Vec<MovieSummary>,
    /// Total number of pages.
    pub total_pages: Option<u32>,
    /// Total number of results.
    pub total_results: Option<u32>,
    /// Release window (`now_playing` and `upcoming` only).
    pub dates: Option<DateRange>,
    /// Fields not declared above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Release window of a dated movie list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DateRange {
    /// Latest release date (YYYY-MM-DD).
    pub maximum: Option<String>,
    /// Earliest release date (YYYY-MM-DD).
    pub minimum: Option<String>,
}

/// A single movie list entry.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MovieSummary {
    /// TMDB movie ID.
    pub id: Option<u64>,
    /// Localized title.
    pub title: Option<String>,
    /// Original title.
    pub original_title: Option<String>,
    /// Original language (ISO 639-1).
    pub original_language: Option<String>,
    /// Release date (YYYY-MM-DD).
    pub release_date: Option<String>,
    /// Overview text.
    pub overview: Option<String>,
    /// Poster image path.
    pub poster_path: Option<String>,
    /// Backdrop image path.
    pub backdrop_path: Option<String>,
    /// Genre IDs.
    #[serde(default)]
    pub genre_ids: Vec<u32>,
    /// Popularity score.
    pub popularity: Option<f64>,
    /// Vote average.
    pub vote_average: Option<f64>,
    /// Vote count.
    pub vote_count: Option<u32>,
    /// Adult flag.
    pub adult: Option<bool>,
    /// `movie`, `tv` or `person` on trending endpoints.
    pub media_type: Option<String>,
    /// Fields not declared above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// --- Movie details ---

/// Response from `movie/{movie_id}`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MovieDetails {
    /// TMDB movie ID.
    pub id: Option<u64>,
    /// IMDB ID (`tt...`).
    pub imdb_id: Option<String>,
    /// Localized title.
    pub title: Option<String>,
    /// Original title.
    pub original_title: Option<String>,
    /// Release date (YYYY-MM-DD).
    pub release_date: Option<String>,
    /// Overview text.
    pub overview: Option<String>,
    /// Tagline.
    pub tagline: Option<String>,
    /// Genres.
    #[serde(default)]
    pub genres: Vec<Genre>,
    /// Runtime in minutes.
    pub runtime: Option<u32>,
    /// Release status (`Released`, `Post Production`, ...).
    pub status: Option<String>,
    /// Poster image path.
    pub poster_path: Option<String>,
    /// Backdrop image path.
    pub backdrop_path: Option<String>,
    /// Homepage URL.
    pub homepage: Option<String>,
    /// Vote average.
    pub vote_average: Option<f64>,
    /// Vote count.
    pub vote_count: Option<u32>,
    /// Fields not declared above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A movie genre.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Genre {
    /// Genre ID.
    pub id: Option<u32>,
    /// Localized genre name.
    pub name: Option<String>,
}

// --- Error ---

/// TMDB API error response body.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TmdbErrorResponse {
    /// TMDB status code.
    pub status_code: u32,
    /// Status message.
    pub status_message: String,
    /// Always `false` for errors.
    #[serde(default)]
    pub success: bool,
}
