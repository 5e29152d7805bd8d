//! TMDB proxy tests against a mock upstream
//!
//! Spins up an in-process axum server standing in for TMDB, so the
//! fan-out and upstream-error paths are covered without a network.

use std::time::{Duration, Instant};

use axum::extract::Path;
use axum::http::{Request, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{body::Body, Json, Router};
use serde_json::{json, Value};
use tower::util::ServiceExt; // for `oneshot` method

use cinetrack_editor::tmdb::TmdbClient;
use cinetrack_editor::{build_router, AppState};

/// Test helper: Serve a mock upstream on an ephemeral port, return its
/// base URL
async fn spawn_upstream(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Should bind mock upstream");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

/// Test helper: Extract JSON body from response
async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn search_page() -> Value {
    json!({
        "results": [
            { "id": 1, "title": "First", "release_date": "2001-01-01",
              "overview": "One", "poster_path": "/1.jpg" },
            { "id": 2, "title": "Second", "release_date": "2002-02-02",
              "overview": "Two", "poster_path": null },
            { "id": 3, "title": "Third", "release_date": "2003-03-03",
              "overview": "Three", "poster_path": "/3.jpg" }
        ]
    })
}

/// Upstream whose credits lookups exercise each degradation path: the
/// first result's lookup is the slowest, the second fails outright, and
/// the third has no director credited.
fn upstream_with_mixed_credits() -> Router {
    Router::new()
        .route("/search/movie", get(|| async { Json(search_page()) }))
        .route(
            "/movie/:id/credits",
            get(|Path(id): Path<u64>| async move {
                match id {
                    1 => {
                        tokio::time::sleep(Duration::from_millis(100)).await;
                        Json(json!({ "crew": [
                            { "job": "Producer", "name": "Someone Else" },
                            { "job": "Director", "name": "Alpha Director" }
                        ] }))
                        .into_response()
                    }
                    2 => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
                    _ => Json(json!({ "crew": [
                        { "job": "Writer", "name": "No Director" }
                    ] }))
                    .into_response(),
                }
            }),
        )
}

async fn unauthorized() -> impl IntoResponse {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "status_code": 7, "status_message": "Invalid API key" })),
    )
}

/// Upstream rejecting everything with TMDB's 401 invalid-key shape
fn upstream_unauthorized() -> Router {
    Router::new()
        .route("/search/movie", get(unauthorized))
        .route("/movie/:id", get(unauthorized))
        .route("/movie/:id/credits", get(unauthorized))
}

// =============================================================================
// Search fan-out
// =============================================================================

#[tokio::test]
async fn test_search_preserves_order_and_degrades_failed_credits() {
    let base = spawn_upstream(upstream_with_mixed_credits()).await;
    let client = TmdbClient::with_base_url("test-key".to_string(), base);

    let results = client.search("anything").await.expect("Should search");

    // Original search order, even though the first lookup finished last
    let titles: Vec<&str> = results.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, ["First", "Second", "Third"]);

    assert_eq!(results[0].director, "Alpha Director");
    // A failed credits lookup degrades that result only
    assert_eq!(results[1].director, "Unknown");
    // A crew with no director credit degrades the same way
    assert_eq!(results[2].director, "Unknown");

    assert_eq!(
        results[0].poster.as_deref(),
        Some("https://image.tmdb.org/t/p/w185/1.jpg")
    );
    assert_eq!(results[1].poster, None);
    assert_eq!(results[0].year, "2001");
}

#[tokio::test]
async fn test_search_credits_lookups_run_concurrently() {
    let results: Vec<Value> = (1..=5)
        .map(|id| json!({ "id": id, "title": format!("Film {id}") }))
        .collect();
    let upstream = Router::new()
        .route(
            "/search/movie",
            get(move || {
                let page = json!({ "results": results });
                async move { Json(page) }
            }),
        )
        .route(
            "/movie/:id/credits",
            get(|| async {
                tokio::time::sleep(Duration::from_millis(200)).await;
                Json(json!({ "crew": [] }))
            }),
        );
    let base = spawn_upstream(upstream).await;
    let client = TmdbClient::with_base_url("test-key".to_string(), base);

    let start = Instant::now();
    let results = client.search("anything").await.expect("Should search");
    let elapsed = start.elapsed();

    assert_eq!(results.len(), 5);
    // Five 200ms lookups run in flight at once, not back to back
    assert!(
        elapsed < Duration::from_millis(700),
        "credits lookups took {elapsed:?}, expected concurrent fan-out"
    );
}

#[tokio::test]
async fn test_search_caps_results_at_eight() {
    let results: Vec<Value> = (1..=12)
        .map(|id| json!({ "id": id, "title": format!("Film {id}") }))
        .collect();
    let upstream = Router::new()
        .route(
            "/search/movie",
            get(move || {
                let page = json!({ "results": results });
                async move { Json(page) }
            }),
        )
        .route(
            "/movie/:id/credits",
            get(|| async { Json(json!({ "crew": [] })) }),
        );
    let base = spawn_upstream(upstream).await;
    let client = TmdbClient::with_base_url("test-key".to_string(), base);

    let results = client.search("anything").await.expect("Should search");

    assert_eq!(results.len(), 8);
    assert_eq!(results[0].title, "Film 1");
    assert_eq!(results[7].title, "Film 8");
}

// =============================================================================
// Upstream error relay
// =============================================================================

#[tokio::test]
async fn test_upstream_error_status_is_not_an_empty_success() {
    let base = spawn_upstream(upstream_unauthorized()).await;
    let client = TmdbClient::with_base_url(String::new(), base);

    // A 401 with a valid JSON body must surface as an error, never as
    // an empty result list
    let err = client.search("dune").await.expect_err("Should fail on 401");
    assert!(err.to_string().contains("401"));

    let err = client.movie("7").await.expect_err("Should fail on 401");
    assert!(err.to_string().contains("401"));
}

#[tokio::test]
async fn test_proxy_endpoints_relay_upstream_errors_as_500() {
    let base = spawn_upstream(upstream_unauthorized()).await;
    let dir = tempfile::tempdir().unwrap();
    let state = AppState::new(
        dir.path().to_path_buf(),
        TmdbClient::with_base_url(String::new(), base),
    );
    let app = build_router(state, dir.path().to_path_buf());

    let response = app
        .clone()
        .oneshot(get_request("/api/tmdb/search?q=dune"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = extract_json(response.into_body()).await;
    assert!(body["error"].as_str().unwrap().contains("401"));

    let response = app
        .oneshot(get_request("/api/tmdb/movie/7"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = extract_json(response.into_body()).await;
    assert!(body["error"].as_str().unwrap().contains("401"));
}

// =============================================================================
// Detail lookup
// =============================================================================

#[tokio::test]
async fn test_movie_detail_reshapes_upstream_response() {
    let upstream = Router::new().route(
        "/movie/:id",
        get(|Path(id): Path<u64>| async move {
            Json(json!({
                "id": id,
                "title": "Lawrence of Arabia",
                "release_date": "1962-12-10",
                "overview": "An epic.",
                "poster_path": "/lawrence.jpg",
                "runtime": 216
            }))
        }),
    );
    let base = spawn_upstream(upstream).await;
    let client = TmdbClient::with_base_url("test-key".to_string(), base);

    let detail = client.movie("933").await.expect("Should fetch detail");

    assert_eq!(detail.id, 933);
    assert_eq!(detail.title, "Lawrence of Arabia");
    assert_eq!(detail.year, "1962");
    assert_eq!(detail.overview, "An epic.");
    assert_eq!(
        detail.poster.as_deref(),
        Some("https://image.tmdb.org/t/p/w500/lawrence.jpg")
    );
    assert_eq!(detail.runtime, Some(216));
}
