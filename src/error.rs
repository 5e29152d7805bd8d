//! Error type shared by all HTTP handlers

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Result type for handler and store operations
pub type Result<T> = std::result::Result<T, ApiError>;

/// Errors a request can fail with.
///
/// Everything except `NotFound` and `InvalidInput` maps to a 500 whose
/// body carries the raw underlying message.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Requested resource does not exist on disk
    #[error("{0}")]
    NotFound(String),

    /// Missing or malformed request parameter
    #[error("{0}")]
    InvalidInput(String),

    /// File I/O failure
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// JSON parse or serialize failure
    #[error("{0}")]
    Json(#[from] serde_json::Error),

    /// Upstream TMDB request failed (network or decode)
    #[error("{0}")]
    Upstream(#[from] reqwest::Error),

    /// Anything else (e.g. malformed manifest contents)
    #[error("{0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}
