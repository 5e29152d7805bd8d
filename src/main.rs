//! cinetrack-editor - Local editing backend for the film-award dataset
//!
//! Serves the editor client, the manifest/film-list file API, and the
//! TMDB proxy on a fixed local port.

use std::path::PathBuf;

use anyhow::Result;
use tracing::info;

use cinetrack_editor::tmdb::TmdbClient;
use cinetrack_editor::{build_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!(
        "Starting CineTrack Editor backend v{}",
        env!("CARGO_PKG_VERSION")
    );

    // The editor runs from inside the dataset checkout: client files sit
    // in the working directory, the JSON data files one level up.
    let static_dir = PathBuf::from(".");
    let data_dir = PathBuf::from("..");

    // The API key is a secret, not configuration; everything else about
    // the service (port, paths) is fixed.
    let api_key = std::env::var("TMDB_API_KEY").unwrap_or_default();
    if api_key.is_empty() {
        info!("TMDB_API_KEY not set; TMDB proxy requests will fail upstream");
    }

    let state = AppState::new(data_dir, TmdbClient::new(api_key));
    let app = build_router(state, static_dir);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
    info!("CineTrack Editor running at http://127.0.0.1:3000");

    axum::serve(listener, app).await?;

    Ok(())
}
