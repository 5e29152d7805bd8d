//! TMDB (The Movie Database) proxy client
//!
//! Forwards search and detail queries upstream and reshapes the
//! responses for the editor UI. Search additionally fans out one
//! credits lookup per result to resolve the director; the lookups run
//! concurrently and any individual failure degrades that result to an
//! unknown director instead of failing the whole search.

use serde::{Deserialize, Serialize};

use crate::error::Result;

const TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";
const SEARCH_POSTER_BASE: &str = "https://image.tmdb.org/t/p/w185";
const DETAIL_POSTER_BASE: &str = "https://image.tmdb.org/t/p/w500";

/// Search returns at most this many results, each costing one extra
/// credits request.
const SEARCH_RESULT_LIMIT: usize = 8;
const OVERVIEW_LIMIT: usize = 150;
const NO_OVERVIEW: &str = "No overview available.";

/// One reshaped search result as the editor consumes it.
#[derive(Debug, Serialize)]
pub struct SearchResult {
    pub id: u64,
    pub title: String,
    /// 4-digit release year, or "Unknown"
    pub year: String,
    /// Director name, or "Unknown"
    pub director: String,
    /// Overview truncated to 150 chars + ellipsis, or a placeholder
    pub overview: String,
    /// Absolute poster image URL, or null
    pub poster: Option<String>,
}

/// Reshaped movie detail.
#[derive(Debug, Serialize)]
pub struct DetailResult {
    pub id: u64,
    pub title: String,
    pub year: String,
    /// Untruncated overview, or a placeholder
    pub overview: String,
    /// Higher-resolution poster URL than search results carry
    pub poster: Option<String>,
    pub runtime: Option<u32>,
}

/// Upstream search page (only the fields we use)
#[derive(Debug, Deserialize)]
struct SearchPage {
    #[serde(default)]
    results: Vec<SearchMovie>,
}

#[derive(Debug, Deserialize)]
struct SearchMovie {
    id: u64,
    title: String,
    #[serde(default)]
    release_date: Option<String>,
    #[serde(default)]
    overview: Option<String>,
    #[serde(default)]
    poster_path: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Credits {
    #[serde(default)]
    crew: Vec<CrewMember>,
}

#[derive(Debug, Deserialize)]
struct CrewMember {
    job: String,
    name: String,
}

#[derive(Debug, Deserialize)]
struct MovieDetail {
    id: u64,
    title: String,
    #[serde(default)]
    release_date: Option<String>,
    #[serde(default)]
    overview: Option<String>,
    #[serde(default)]
    poster_path: Option<String>,
    #[serde(default)]
    runtime: Option<u32>,
}

/// TMDB API client
///
/// No timeout is configured: a hung upstream request hangs the
/// corresponding handler, which is acceptable for a local tool.
#[derive(Clone)]
pub struct TmdbClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl TmdbClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, TMDB_BASE_URL.to_string())
    }

    /// Client pointed at an alternate upstream base URL. Tests use this
    /// to stand in a local mock for TMDB.
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
            api_key,
        }
    }

    /// Search movies by title and resolve each result's director.
    pub async fn search(&self, query: &str) -> Result<Vec<SearchResult>> {
        let url = format!("{}/search/movie", self.base_url);
        let page: SearchPage = self
            .http
            .get(&url)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("query", query),
                ("include_adult", "false"),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let movies: Vec<SearchMovie> = page
            .results
            .into_iter()
            .take(SEARCH_RESULT_LIMIT)
            .collect();

        // One credits lookup per result, all in flight at once.
        let mut lookups = Vec::with_capacity(movies.len());
        for movie in &movies {
            let client = self.clone();
            let id = movie.id;
            lookups.push(tokio::spawn(async move { client.fetch_director(id).await }));
        }

        // Join in original result order; a failed lookup (or a panicked
        // task) yields an unknown director for that entry only.
        let mut results = Vec::with_capacity(movies.len());
        for (movie, lookup) in movies.into_iter().zip(lookups) {
            let director = lookup.await.ok().flatten();
            results.push(reshape_search_result(movie, director));
        }

        tracing::debug!(query = %query, count = results.len(), "TMDB search complete");
        Ok(results)
    }

    /// Fetch one movie's detail record.
    pub async fn movie(&self, id: &str) -> Result<DetailResult> {
        let url = format!("{}/movie/{}", self.base_url, id);
        let detail: MovieDetail = self
            .http
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(reshape_detail(detail))
    }

    /// First crew member whose job is "Director", if any. All failure
    /// modes (network, decode, no director credited) collapse to None.
    async fn fetch_director(&self, id: u64) -> Option<String> {
        let url = format!("{}/movie/{}/credits", self.base_url, id);
        let credits: Credits = self
            .http
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .send()
            .await
            .ok()?
            .json()
            .await
            .ok()?;

        credits
            .crew
            .into_iter()
            .find(|member| member.job == "Director")
            .map(|member| member.name)
    }
}

fn reshape_search_result(movie: SearchMovie, director: Option<String>) -> SearchResult {
    SearchResult {
        id: movie.id,
        title: movie.title,
        year: release_year(movie.release_date.as_deref()),
        director: director.unwrap_or_else(|| "Unknown".to_string()),
        overview: truncate_overview(movie.overview.as_deref()),
        poster: movie
            .poster_path
            .as_deref()
            .map(|path| format!("{SEARCH_POSTER_BASE}{path}")),
    }
}

fn reshape_detail(detail: MovieDetail) -> DetailResult {
    DetailResult {
        id: detail.id,
        title: detail.title,
        year: release_year(detail.release_date.as_deref()),
        overview: full_overview(detail.overview.as_deref()),
        poster: detail
            .poster_path
            .as_deref()
            .map(|path| format!("{DETAIL_POSTER_BASE}{path}")),
        runtime: detail.runtime,
    }
}

/// First four characters of a `YYYY-MM-DD` release date, or "Unknown".
fn release_year(date: Option<&str>) -> String {
    match date.and_then(|d| d.get(..4)) {
        Some(year) => year.to_string(),
        None => "Unknown".to_string(),
    }
}

/// Truncate an overview to 150 characters plus an ellipsis; empty or
/// missing overviews get a placeholder.
fn truncate_overview(overview: Option<&str>) -> String {
    match overview {
        None | Some("") => NO_OVERVIEW.to_string(),
        Some(text) if text.chars().count() > OVERVIEW_LIMIT => {
            let cut: String = text.chars().take(OVERVIEW_LIMIT).collect();
            format!("{cut}...")
        }
        Some(text) => text.to_string(),
    }
}

fn full_overview(overview: Option<&str>) -> String {
    match overview {
        None | Some("") => NO_OVERVIEW.to_string(),
        Some(text) => text.to_string(),
    }
}
