//! TMDB proxy endpoints

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::{ApiError, Result};
use crate::tmdb::DetailResult;
use crate::AppState;

/// Query parameters for movie search
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: Option<String>,
}

/// GET /api/tmdb/search?q=
///
/// Searches TMDB and resolves each result's director before replying.
pub async fn search_movies(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Value>> {
    let query = match params.q.as_deref() {
        Some(q) if !q.is_empty() => q,
        _ => return Err(ApiError::InvalidInput("Missing search query".to_string())),
    };

    let results = state.tmdb.search(query).await?;
    Ok(Json(json!({ "results": results })))
}

/// GET /api/tmdb/movie/:id
pub async fn movie_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DetailResult>> {
    Ok(Json(state.tmdb.movie(&id).await?))
}
