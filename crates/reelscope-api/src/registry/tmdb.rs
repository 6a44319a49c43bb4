//! Built-in TMDB API v3 endpoint table.
//!
//! Every object shape is partial + passthrough: TMDB adds fields without
//! notice and omits others freely, so only the types of present fields are
//! checked.

use super::{EndpointDefinition, ParameterSpec, Registry};
use crate::error::ApiError;
use crate::schema::Shape;

/// Default TMDB API host. Paths in the table carry the `/3` version prefix.
pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org";

/// Default `language` query value.
pub const DEFAULT_LANGUAGE: &str = "en-US";

/// Builds the registry of all built-in TMDB endpoints.
///
/// # Errors
///
/// Returns [`ApiError::Configuration`] if the table is inconsistent.
pub fn registry() -> Result<Registry, ApiError> {
    Registry::register(endpoints())
}

/// Partial + passthrough object.
fn record<const N: usize>(fields: [(&str, Shape); N]) -> Shape {
    Shape::object(fields).partial().passthrough()
}

fn text() -> Shape {
    Shape::string()
}

fn int() -> Shape {
    Shape::integer().with_default(0)
}

fn num() -> Shape {
    Shape::number().with_default(0)
}

fn flag() -> Shape {
    Shape::boolean().with_default(true)
}

fn any() -> Shape {
    Shape::unknown()
}

fn list(element: Shape) -> Shape {
    Shape::array(element)
}

fn movie_id() -> ParameterSpec {
    ParameterSpec::path("movie_id", Shape::integer())
}

fn time_window() -> ParameterSpec {
    ParameterSpec::path(
        "time_window",
        Shape::one_of(["day", "week"]).with_default("day"),
    )
}

fn language() -> ParameterSpec {
    ParameterSpec::optional_query("language", Shape::string().with_default(DEFAULT_LANGUAGE))
}

fn page() -> ParameterSpec {
    ParameterSpec::optional_query("page", Shape::integer().with_default(1))
}

fn optional(name: &str) -> ParameterSpec {
    ParameterSpec::optional_query(name, Shape::string())
}

/// Movie entry of list endpoints (popular, top rated, similar, ...).
fn movie_item() -> Shape {
    record([
        ("adult", flag()),
        ("backdrop_path", text()),
        ("genre_ids", list(Shape::number())),
        ("id", int()),
        ("original_language", text()),
        ("original_title", text()),
        ("overview", text()),
        ("popularity", num()),
        ("poster_path", text()),
        ("release_date", text()),
        ("title", text()),
        ("video", flag()),
        ("vote_average", num()),
        ("vote_count", int()),
    ])
}

/// Movie entry tagged with `media_type` (trending, find).
fn media_movie_item() -> Shape {
    record([
        ("adult", flag()),
        ("backdrop_path", text()),
        ("id", int()),
        ("title", text()),
        ("original_language", text()),
        ("original_title", text()),
        ("overview", text()),
        ("poster_path", text()),
        ("media_type", text()),
        ("genre_ids", list(Shape::number())),
        ("popularity", num()),
        ("release_date", text()),
        ("video", flag()),
        ("vote_average", num()),
        ("vote_count", int()),
    ])
}

fn paged(item: Shape) -> Shape {
    record([
        ("page", int()),
        ("results", list(item)),
        ("total_pages", int()),
        ("total_results", int()),
    ])
}

fn dated_page(item: Shape) -> Shape {
    record([
        ("dates", record([("maximum", text()), ("minimum", text())])),
        ("page", int()),
        ("results", list(item)),
        ("total_pages", int()),
        ("total_results", int()),
    ])
}

fn image() -> Shape {
    record([
        ("aspect_ratio", num()),
        ("height", int()),
        ("iso_639_1", any()),
        ("file_path", text()),
        ("vote_average", num()),
        ("vote_count", int()),
        ("width", int()),
    ])
}

fn credit_person<const N: usize>(extra: [(&'static str, Shape); N]) -> Shape {
    let mut fields = vec![
        ("adult", flag()),
        ("gender", int()),
        ("id", int()),
        ("known_for_department", text()),
        ("name", text()),
        ("original_name", text()),
        ("popularity", num()),
        ("profile_path", text()),
        ("credit_id", text()),
    ];
    fields.extend(extra);
    Shape::object(fields).partial().passthrough()
}

fn movie_list_endpoint(
    alias: &str,
    path: &str,
    description: &str,
    response: Shape,
) -> EndpointDefinition {
    EndpointDefinition::get(alias, path)
        .describe(description)
        .param(language())
        .param(page())
        .param(optional("region"))
        .response(response)
}

fn trending_endpoint(
    alias: &str,
    path: &str,
    description: &str,
    item: Shape,
) -> EndpointDefinition {
    EndpointDefinition::get(alias, path)
        .describe(description)
        .param(time_window())
        .param(language())
        .response(paged(item))
}

/// All built-in endpoint definitions, in registration order.
#[must_use]
#[allow(clippy::too_many_lines)]
pub fn endpoints() -> Vec<EndpointDefinition> {
    vec![
        EndpointDefinition::get("find-by-id", "/3/find/:external_id")
            .describe("Find data by external IDs.")
            .param(ParameterSpec::path("external_id", Shape::string()))
            .param(ParameterSpec::query(
                "external_source",
                Shape::one_of([
                    "",
                    "imdb_id",
                    "facebook_id",
                    "instagram_id",
                    "tvdb_id",
                    "tiktok_id",
                    "twitter_id",
                    "wikidata_id",
                    "youtube_id",
                ]),
            ))
            .param(optional("language"))
            .response(record([
                ("movie_results", list(media_movie_item())),
                ("person_results", list(any())),
                ("tv_results", list(any())),
                ("tv_episode_results", list(any())),
                ("tv_season_results", list(any())),
            ])),
        EndpointDefinition::get("movie-details", "/3/movie/:movie_id")
            .describe("Get the top level details of a movie by ID.")
            .param(movie_id())
            .param(optional("append_to_response"))
            .param(language())
            .response(record([
                ("adult", flag()),
                ("backdrop_path", text()),
                ("belongs_to_collection", any()),
                ("budget", int()),
                ("genres", list(record([("id", int()), ("name", text())]))),
                ("homepage", text()),
                ("id", int()),
                ("imdb_id", text()),
                ("original_language", text()),
                ("original_title", text()),
                ("overview", text()),
                ("popularity", num()),
                ("poster_path", text()),
                (
                    "production_companies",
                    list(record([
                        ("id", int()),
                        ("logo_path", text()),
                        ("name", text()),
                        ("origin_country", text()),
                    ])),
                ),
                (
                    "production_countries",
                    list(record([("iso_3166_1", text()), ("name", text())])),
                ),
                ("release_date", text()),
                ("revenue", int()),
                ("runtime", int()),
                (
                    "spoken_languages",
                    list(record([
                        ("english_name", text()),
                        ("iso_639_1", text()),
                        ("name", text()),
                    ])),
                ),
                ("status", text()),
                ("tagline", text()),
                ("title", text()),
                ("video", flag()),
                ("vote_average", num()),
                ("vote_count", int()),
            ])),
        EndpointDefinition::get("movie-account-states", "/3/movie/:movie_id/account_states")
            .describe("Get the rating, watchlist and favourite status of an account.")
            .param(movie_id())
            .param(optional("session_id"))
            .param(optional("guest_session_id"))
            .response(record([
                ("id", int()),
                ("favorite", flag()),
                ("rated", record([("value", int())])),
                ("watchlist", flag()),
            ])),
        EndpointDefinition::get(
            "movie-alternative-titles",
            "/3/movie/:movie_id/alternative_titles",
        )
        .describe("Get the alternative titles for a movie.")
        .param(movie_id())
        .param(optional("country"))
        .response(record([
            ("id", int()),
            (
                "titles",
                list(record([
                    ("iso_3166_1", text()),
                    ("title", text()),
                    ("type", text()),
                ])),
            ),
        ])),
        EndpointDefinition::get("movie-changes", "/3/movie/:movie_id/changes")
            .describe("Get the recent changes for a movie.")
            .param(movie_id())
            .param(optional("end_date"))
            .param(page())
            .param(optional("start_date"))
            .response(record([(
                "changes",
                list(record([
                    ("key", text()),
                    (
                        "items",
                        list(record([
                            ("id", text()),
                            ("action", text()),
                            ("time", text()),
                            ("iso_639_1", text()),
                            ("iso_3166_1", text()),
                            (
                                "value",
                                record([("poster", record([("file_path", text())]))]),
                            ),
                        ])),
                    ),
                ])),
            )])),
        EndpointDefinition::get("movie-credits", "/3/movie/:movie_id/credits")
            .param(movie_id())
            .param(language())
            .response(record([
                ("id", int()),
                (
                    "cast",
                    list(credit_person([
                        ("cast_id", int()),
                        ("character", text()),
                        ("order", int()),
                    ])),
                ),
                (
                    "crew",
                    list(credit_person([("department", text()), ("job", text())])),
                ),
            ])),
        EndpointDefinition::get("movie-external-ids", "/3/movie/:movie_id/external_ids")
            .param(movie_id())
            .response(record([
                ("id", int()),
                ("imdb_id", text()),
                ("wikidata_id", any()),
                ("facebook_id", text()),
                ("instagram_id", any()),
                ("twitter_id", any()),
            ])),
        EndpointDefinition::get("movie-images", "/3/movie/:movie_id/images")
            .describe("Get the images that belong to a movie.")
            .param(movie_id())
            .param(optional("include_image_language"))
            .param(optional("language"))
            .response(record([
                ("backdrops", list(image())),
                ("id", int()),
                ("logos", list(image())),
                ("posters", list(image())),
            ])),
        EndpointDefinition::get("movie-keywords", "/3/movie/:movie_id/keywords")
            .param(ParameterSpec::path("movie_id", Shape::string()))
            .response(record([
                ("id", int()),
                ("keywords", list(record([("id", int()), ("name", text())]))),
            ])),
        EndpointDefinition::get("movie-lists", "/3/movie/:movie_id/lists")
            .describe("Get the lists that a movie has been added to.")
            .param(movie_id())
            .param(language())
            .param(page())
            .response(record([
                ("id", int()),
                ("page", int()),
                (
                    "results",
                    list(record([
                        ("description", text()),
                        ("favorite_count", int()),
                        ("id", int()),
                        ("item_count", int()),
                        ("iso_639_1", text()),
                        ("list_type", text()),
                        ("name", text()),
                        ("poster_path", any()),
                    ])),
                ),
                ("total_pages", int()),
                ("total_results", int()),
            ])),
        EndpointDefinition::get(
            "movie-recommendations",
            "/3/movie/:movie_id/recommendations",
        )
            .param(movie_id())
            .param(language())
            .param(page())
            .response(record([])),
        EndpointDefinition::get("movie-release-dates", "/3/movie/:movie_id/release_dates")
            .describe("Get the release dates and certifications for a movie.")
            .param(movie_id())
            .response(record([
                ("id", int()),
                (
                    "results",
                    list(record([
                        ("iso_3166_1", text()),
                        (
                            "release_dates",
                            list(record([
                                ("certification", text()),
                                ("descriptors", list(any())),
                                ("iso_639_1", text()),
                                ("note", text()),
                                ("release_date", text()),
                                ("type", int()),
                            ])),
                        ),
                    ])),
                ),
            ])),
        EndpointDefinition::get("movie-reviews", "/3/movie/:movie_id/reviews")
            .describe("Get the user reviews for a movie.")
            .param(movie_id())
            .param(language())
            .param(page())
            .response(record([
                ("id", int()),
                ("page", int()),
                (
                    "results",
                    list(record([
                        ("author", text()),
                        (
                            "author_details",
                            record([
                                ("name", text()),
                                ("username", text()),
                                ("avatar_path", text()),
                                ("rating", any()),
                            ]),
                        ),
                        ("content", text()),
                        ("created_at", text()),
                        ("id", text()),
                        ("updated_at", text()),
                        ("url", text()),
                    ])),
                ),
                ("total_pages", int()),
                ("total_results", int()),
            ])),
        EndpointDefinition::get("movie-similar", "/3/movie/:movie_id/similar")
            .describe("Get the similar movies based on genres and keywords.")
            .param(movie_id())
            .param(language())
            .param(page())
            .response(paged(movie_item())),
        EndpointDefinition::get("movie-translations", "/3/movie/:movie_id/translations")
            .describe("Get the translations for a movie.")
            .param(movie_id())
            .response(record([
                ("id", int()),
                (
                    "translations",
                    list(record([
                        ("iso_3166_1", text()),
                        ("iso_639_1", text()),
                        ("name", text()),
                        ("english_name", text()),
                        (
                            "data",
                            record([
                                ("homepage", text()),
                                ("overview", text()),
                                ("runtime", int()),
                                ("tagline", text()),
                                ("title", text()),
                            ]),
                        ),
                    ])),
                ),
            ])),
        EndpointDefinition::get("movie-videos", "/3/movie/:movie_id/videos")
            .param(movie_id())
            .param(language())
            .response(record([
                ("id", int()),
                (
                    "results",
                    list(record([
                        ("iso_639_1", text()),
                        ("iso_3166_1", text()),
                        ("name", text()),
                        ("key", text()),
                        ("site", text()),
                        ("size", int()),
                        ("type", text()),
                        ("official", flag()),
                        ("published_at", text()),
                        ("id", text()),
                    ])),
                ),
            ])),
        EndpointDefinition::get("movie-latest-id", "/3/movie/latest")
            .describe("Get the newest movie ID.")
            .response(record([
                ("adult", flag()),
                ("backdrop_path", any()),
                ("belongs_to_collection", any()),
                ("budget", int()),
                ("genres", list(any())),
                ("homepage", text()),
                ("id", int()),
                ("imdb_id", any()),
                ("original_language", text()),
                ("original_title", text()),
                ("overview", text()),
                ("popularity", num()),
                ("poster_path", any()),
                ("production_companies", list(any())),
                ("production_countries", list(any())),
                ("release_date", text()),
                ("revenue", int()),
                ("runtime", int()),
                ("spoken_languages", list(any())),
                ("status", text()),
                ("tagline", text()),
                ("title", text()),
                ("video", flag()),
                ("vote_average", num()),
                ("vote_count", int()),
            ])),
        movie_list_endpoint(
            "movie-now-playing-list",
            "/3/movie/now_playing",
            "Get a list of movies that are currently in theatres.",
            dated_page(movie_item()),
        ),
        movie_list_endpoint(
            "movie-popular-list",
            "/3/movie/popular",
            "Get a list of movies ordered by popularity.",
            paged(movie_item()),
        ),
        movie_list_endpoint(
            "movie-top-rated-list",
            "/3/movie/top_rated",
            "Get a list of movies ordered by rating.",
            paged(movie_item()),
        ),
        movie_list_endpoint(
            "movieUpcomingList",
            "/3/movie/upcoming",
            "Get a list of movies that are being released soon.",
            dated_page(movie_item()),
        ),
        trending_endpoint(
            "trending-all",
            "/3/trending/all/:time_window",
            "Get the trending movies, TV shows and people.",
            media_movie_item(),
        ),
        trending_endpoint(
            "trending-movies",
            "/3/trending/movie/:time_window",
            "Get the trending movies on TMDB.",
            media_movie_item(),
        ),
        trending_endpoint(
            "trending-people",
            "/3/trending/person/:time_window",
            "Get the trending people on TMDB.",
            record([
                ("adult", flag()),
                ("id", int()),
                ("name", text()),
                ("original_name", text()),
                ("media_type", text()),
                ("popularity", num()),
                ("gender", int()),
                ("known_for_department", text()),
                ("profile_path", text()),
                ("known_for", list(media_movie_item())),
            ]),
        ),
        trending_endpoint(
            "trending-tv",
            "/3/trending/tv/:time_window",
            "Get the trending TV shows on TMDB.",
            record([
                ("adult", flag()),
                ("backdrop_path", text()),
                ("id", int()),
                ("name", text()),
                ("original_language", text()),
                ("original_name", text()),
                ("overview", text()),
                ("poster_path", text()),
                ("media_type", text()),
                ("genre_ids", list(Shape::number())),
                ("popularity", num()),
                ("first_air_date", text()),
                ("vote_average", num()),
                ("vote_count", int()),
                ("origin_country", list(text())),
            ]),
        ),
    ]
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::panic)]

    use reqwest::Method;
    use serde_json::json;

    use super::*;
    use crate::registry::ParamLocation;
    use crate::schema::validate;

    #[test]
    fn test_builtin_table_registers() {
        // Arrange & Act
        let registry = registry().unwrap();

        // Assert
        assert_eq!(registry.len(), 25);
        assert!(registry.get("movie-details").is_some());
        assert!(registry.get("movieUpcomingList").is_some());
        assert_eq!(
            registry.alias_for(&Method::GET, "/3/trending/all/:time_window"),
            Some("trending-all")
        );
    }

    #[test]
    fn test_every_endpoint_is_get_with_version_prefix() {
        // Arrange
        let registry = registry().unwrap();

        // Act & Assert
        for alias in registry.aliases() {
            let definition = registry.get(alias).unwrap();
            assert_eq!(definition.method, Method::GET, "{alias}");
            assert!(definition.path_template.starts_with("/3/"), "{alias}");
        }
    }

    #[test]
    fn test_movie_details_parameters() {
        // Arrange
        let registry = registry().unwrap();

        // Act
        let definition = registry.get("movie-details").unwrap();
        let language = definition
            .parameters_at(ParamLocation::Query)
            .find(|p| p.name == "language")
            .unwrap();

        // Assert
        assert_eq!(language.shape.default_value(), Some(&json!("en-US")));
        assert!(!language.is_required());
        assert!(
            definition
                .parameters_at(ParamLocation::Path)
                .all(ParameterSpec::is_required)
        );
    }

    #[test]
    fn test_now_playing_and_upcoming_carry_dates() {
        // Arrange
        let registry = registry().unwrap();
        let body = json!({"dates": {"maximum": "2024-06-01", "minimum": "2024-05-01"}});

        // Act
        let upcoming = registry.get("movieUpcomingList").unwrap();
        let popular = registry.get("movie-popular-list").unwrap();
        let upcoming = validate(&upcoming.response, &body).unwrap();
        let popular = validate(&popular.response, &body).unwrap();

        // Assert
        assert_eq!(upcoming, body);
        // `dates` is undeclared for popular but survives via passthrough.
        assert_eq!(popular, body);
    }

    #[test]
    fn test_movie_lists_response_declares_top_level_id() {
        // Arrange
        let registry = registry().unwrap();
        let definition = registry.get("movie-lists").unwrap();

        // Act
        let Shape::Object(ref object) = definition.response else {
            panic!("movie-lists response is not an object");
        };
        let names: Vec<&str> = object.fields.iter().map(|(n, _)| n.as_str()).collect();

        // Assert
        assert_eq!(
            names,
            vec!["id", "page", "results", "total_pages", "total_results"]
        );
    }

    #[test]
    fn test_find_requires_external_source() {
        // Arrange
        let registry = registry().unwrap();
        let definition = registry.get("find-by-id").unwrap();

        // Act
        let source = definition
            .parameters_at(ParamLocation::Query)
            .find(|p| p.name == "external_source")
            .unwrap();

        // Assert
        assert!(source.is_required());
    }
}
