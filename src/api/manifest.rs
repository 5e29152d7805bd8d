//! Manifest endpoints

use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use crate::error::Result;
use crate::store;
use crate::AppState;

/// GET /api/manifest
///
/// Returns the manifest document verbatim.
pub async fn get_manifest(State(state): State<AppState>) -> Result<Json<Value>> {
    let manifest = store::read_json(&store::manifest_file(&state.data_dir))?;
    Ok(Json(manifest))
}

/// POST /api/manifest
///
/// Overwrites the manifest with the posted document. No merge, no shape
/// validation; the editor owns the document.
pub async fn save_manifest(
    State(state): State<AppState>,
    Json(manifest): Json<Value>,
) -> Result<Json<Value>> {
    store::write_json(&store::manifest_file(&state.data_dir), &manifest)?;
    Ok(Json(json!({ "success": true })))
}
