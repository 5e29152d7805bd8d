//! Per-year film list endpoints

use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use crate::error::{ApiError, Result};
use crate::store;
use crate::AppState;

/// Body of a film-list save
#[derive(Debug, Deserialize)]
pub struct SaveFilmsRequest {
    /// Full replacement film list; record shape is owned by the client
    pub films: Vec<Value>,
    /// Optional changelog note, replaces the manifest's current one
    #[serde(default)]
    pub changelog: Option<String>,
}

/// GET /api/films/:year
pub async fn get_films(
    State(state): State<AppState>,
    Path(year): Path<String>,
) -> Result<Json<Value>> {
    let path = store::film_file(&state.data_dir, &year);
    if !path.exists() {
        return Err(ApiError::NotFound("Year not found".to_string()));
    }
    Ok(Json(store::read_json(&path)?))
}

/// POST /api/films/:year
///
/// Writes the year's film file, then applies the manifest bookkeeping
/// (patch bump, timestamp, optional changelog, film count). The two
/// writes are not atomic; a failure between them leaves the film file
/// ahead of the manifest.
pub async fn save_films(
    State(state): State<AppState>,
    Path(year): Path<String>,
    Json(req): Json<SaveFilmsRequest>,
) -> Result<Json<Value>> {
    let SaveFilmsRequest { films, changelog } = req;
    let film_count = films.len();

    store::write_json(&store::film_file(&state.data_dir, &year), &Value::Array(films))?;

    let manifest_path = store::manifest_file(&state.data_dir);
    let mut manifest = store::read_json(&manifest_path)?;
    let version =
        store::update_manifest_for_save(&mut manifest, &year, film_count, changelog.as_deref())?;
    store::write_json(&manifest_path, &manifest)?;

    info!(year = %year, films = film_count, version = %version, "Saved film list");

    Ok(Json(json!({ "success": true, "version": version })))
}
