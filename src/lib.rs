//! CineTrack editor backend
//!
//! Local HTTP service for editing the film-award dataset: a flat-file
//! manifest plus one JSON film list per year, and a TMDB search/detail
//! proxy for the editor UI. Single editor, no locking; handlers are
//! stateless and re-read disk on every request.

use std::path::PathBuf;

use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::Router;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::tmdb::TmdbClient;

/// Film-list saves can exceed axum's 2 MB default request body limit.
const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

pub mod api;
pub mod error;
pub mod store;
pub mod tmdb;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Directory holding manifest.json and the oscars<year>.json files
    pub data_dir: PathBuf,
    /// TMDB proxy client
    pub tmdb: TmdbClient,
}

impl AppState {
    /// Create new application state
    pub fn new(data_dir: PathBuf, tmdb: TmdbClient) -> Self {
        Self { data_dir, tmdb }
    }
}

/// Build application router
///
/// API routes take precedence; anything else falls through to the
/// static editor client files under `static_dir`.
pub fn build_router(state: AppState, static_dir: PathBuf) -> Router {
    Router::new()
        .route(
            "/api/manifest",
            get(api::get_manifest).post(api::save_manifest),
        )
        .route(
            "/api/films/:year",
            get(api::get_films).post(api::save_films),
        )
        .route("/api/tmdb/search", get(api::search_movies))
        .route("/api/tmdb/movie/:id", get(api::movie_detail))
        .merge(api::health_routes())
        .fallback_service(ServeDir::new(static_dir))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
