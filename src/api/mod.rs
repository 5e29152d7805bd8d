//! HTTP API handlers

pub mod films;
pub mod health;
pub mod manifest;
pub mod tmdb;

pub use films::{get_films, save_films};
pub use health::health_routes;
pub use manifest::{get_manifest, save_manifest};
pub use tmdb::{movie_detail, search_movies};
