#![allow(clippy::unwrap_used)]
#![allow(missing_docs)]

use reelscope_api::schema::{Shape, validate};
use reelscope_api::{
    ApiClient, ApiError, EndpointDefinition, Invocation, ParameterSpec, Registry, auth,
};
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn authed_client(server: &MockServer) -> ApiClient {
    let mut client = ApiClient::builder()
        .base_url(server.uri().parse().unwrap())
        .build()
        .unwrap();
    auth::install(&mut client, || async { Ok(String::from("abc")) });
    client
}

#[test]
fn test_duplicate_alias_fails_registration() {
    let definitions = [
        EndpointDefinition::get("movie-popular-list", "/3/movie/popular"),
        EndpointDefinition::get("movie-popular-list", "/3/movie/top_rated"),
    ];

    let result = Registry::register(definitions);

    assert!(matches!(result, Err(ApiError::Configuration(_))));
}

#[test]
fn test_passthrough_partial_and_defaults() {
    let shape = Shape::object([
        ("title", Shape::string()),
        ("page", Shape::integer().with_default(1)),
    ])
    .partial()
    .passthrough();

    let kept = validate(&shape, &json!({"title": "Heat", "extra": [1, 2]})).unwrap();
    let empty = validate(&shape, &json!({})).unwrap();

    assert_eq!(kept, json!({"title": "Heat", "extra": [1, 2]}));
    assert_eq!(empty, json!({}));
}

#[tokio::test]
async fn test_custom_registry_end_to_end() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/films/tt0113277"))
        .and(query_param("lang", "en"))
        .and(header("authorization", "Bearer abc"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"title": "Heat", "year": 1995.0})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let registry = Registry::register([EndpointDefinition::get("film", "/v1/films/:imdb_id")
        .param(ParameterSpec::path("imdb_id", Shape::string()))
        .param(ParameterSpec::optional_query(
            "lang",
            Shape::one_of(["en", "nl"]).with_default("en"),
        ))
        .response(Shape::object([
            ("title", Shape::string()),
            ("year", Shape::integer()),
        ]))])
    .unwrap();

    let mut client = ApiClient::builder()
        .base_url(mock_server.uri().parse().unwrap())
        .registry(registry)
        .build()
        .unwrap();
    auth::install(&mut client, || async { Ok(String::from("abc")) });

    let film = client
        .invoke("film", Invocation::new().param("imdb_id", "tt0113277"))
        .await
        .unwrap();

    assert_eq!(film, json!({"title": "Heat", "year": 1995}));
}

#[tokio::test]
async fn test_movie_details_path_query_and_auth() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/3/movie/123"))
        .and(query_param("language", "en-US"))
        .and(header("authorization", "Bearer abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 123})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = authed_client(&mock_server);

    let value = client
        .invoke("movie-details", Invocation::new().param("movie_id", 123))
        .await
        .unwrap();

    assert_eq!(value, json!({"id": 123}));
}

#[tokio::test]
async fn test_trending_rejects_unknown_time_window_without_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = authed_client(&mock_server);

    let invocation = Invocation::new().param("time_window", "monthly");
    let result = client.invoke("trending-all", invocation).await;

    assert!(matches!(result, Err(ApiError::Validation(_))));
}

#[tokio::test]
async fn test_not_found_body_is_returned_verbatim() {
    let mock_server = MockServer::start().await;
    let body = r#"{"status_code":34,"status_message":"The resource you requested could not be found.","success":false}"#;

    Mock::given(method("GET"))
        .and(path("/3/movie/0/credits"))
        .respond_with(ResponseTemplate::new(404).set_body_string(body))
        .mount(&mock_server)
        .await;

    let client = authed_client(&mock_server);

    let err = client
        .invoke("movie-credits", Invocation::new().param("movie_id", 0))
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Http { status: 404, body: ref b } if b == body));
}
