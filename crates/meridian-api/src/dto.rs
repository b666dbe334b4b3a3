//! Request/response bodies for the admin API.
//!
//! Field names and shapes are carried over from the original crawler's
//! Pydantic models in `app/models/data_types.py`, translated into `serde`
//! structs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// `POST /login` request body.
#[derive(Debug, Deserialize)]
pub struct LoginData {
    /// Admin username.
    pub username: String,
    /// Admin password, plaintext over TLS.
    pub password: String,
}

/// `POST /login` response body.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    /// Signed JWT.
    pub token: String,
    /// Token type, always `bearer`.
    #[serde(rename = "type")]
    pub token_type: String,
}

/// `POST /seeds` request body: register a new seed site.
#[derive(Debug, Deserialize)]
pub struct SeedUrlRequest {
    /// Origin URL of the new seed site.
    pub url: String,
    /// Path suffixes to seed the frontier with, in addition to the origin.
    #[serde(default)]
    pub seeds: Vec<String>,
}

/// `DELETE /seeds` request body.
#[derive(Debug, Deserialize)]
pub struct UrlDeleteData {
    /// URL of the seed site to remove.
    pub url: String,
}

/// `PUT /seeds` request body: rename a seed site's URL.
#[derive(Debug, Deserialize)]
pub struct UrlUpdateData {
    /// Current URL.
    pub url: String,
    /// Previous URL being replaced (kept for parity with the original
    /// update-by-old-value API shape).
    pub old_url: String,
}

/// `POST /seeds/suffix` / `DELETE /seeds/suffix` request body.
#[derive(Debug, Deserialize)]
pub struct SeedAddDeleteData {
    /// Seed site URL.
    pub url: String,
    /// The suffix to add or remove.
    pub seed: String,
}

/// `PUT /seeds/suffix` request body: rename an existing suffix.
#[derive(Debug, Deserialize)]
pub struct SeedUpdateData {
    /// Seed site URL.
    pub url: String,
    /// New suffix value.
    pub new_seed: String,
    /// Existing suffix value being replaced.
    pub old_seed: String,
}

/// A crawled resource, as returned by `GET /resources`.
#[derive(Debug, Serialize)]
pub struct CrawledUrl {
    /// Canonical URL.
    pub url: String,
    /// First successful crawl timestamp.
    pub first_visited: DateTime<Utc>,
    /// Most recent successful crawl timestamp.
    pub last_visited: DateTime<Utc>,
    /// Number of successful crawls.
    pub all_visits: i32,
    /// Links on this page pointing outside its own origin.
    pub external_links: Vec<String>,
}

impl From<meridian_types::CrawledResource> for CrawledUrl {
    fn from(r: meridian_types::CrawledResource) -> Self {
        Self {
            url: r.url,
            first_visited: r.first_visited,
            last_visited: r.last_visited,
            all_visits: r.all_visits,
            external_links: r.external_links,
        }
    }
}

/// A potential (discovered but not crawled) URL, as returned by
/// `GET /potential-urls`.
#[derive(Debug, Serialize)]
pub struct PotentialUrlResponse {
    /// The URL.
    pub url: String,
    /// When it was first observed.
    pub first_seen: DateTime<Utc>,
    /// How many times it has been re-observed.
    pub times_seen: i32,
}

impl From<meridian_types::PotentialUrl> for PotentialUrlResponse {
    fn from(p: meridian_types::PotentialUrl) -> Self {
        Self {
            url: p.url,
            first_seen: p.first_seen,
            times_seen: p.times_seen,
        }
    }
}

/// A seed site, as returned by `GET /seeds`.
#[derive(Debug, Serialize)]
pub struct SeedSiteResponse {
    /// Origin URL.
    pub url: String,
    /// Configured path suffixes.
    pub seeds: Vec<String>,
}

impl From<meridian_types::SeedSite> for SeedSiteResponse {
    fn from(s: meridian_types::SeedSite) -> Self {
        Self {
            url: s.url,
            seeds: s.seeds,
        }
    }
}

/// `POST /crawl/start` request body: optional per-run overrides.
#[derive(Debug, Deserialize, Default)]
pub struct CrawlStartRequest {
    /// Explicit whitelist regex patterns, overriding the seed-origin default.
    pub regex: Option<Vec<String>>,
    /// Cap on URLs the Fetcher/Processor each handle this run.
    pub max_iter: Option<u64>,
}

/// `POST /crawl/start` response body.
#[derive(Debug, Serialize)]
pub struct CrawlStartedResponse {
    /// Human-readable status line.
    pub message: String,
}

/// `GET /search` query parameters.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    /// Free-text query.
    pub q: String,
    /// Maximum number of results to return.
    #[serde(default = "default_search_limit")]
    pub limit: usize,
}

fn default_search_limit() -> usize {
    30
}

/// A single search result, as returned by `GET /search`.
#[derive(Debug, Serialize)]
pub struct SearchResult {
    /// Matching page URL.
    pub url: String,
    /// Aggregate relevance score across matching chunks.
    pub score: f32,
}
