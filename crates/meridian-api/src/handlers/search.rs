//! Semantic search endpoint.
//!
//! Grounded on the original crawler's `app/core/search.py::get_top_matches`:
//! embed the query, fetch the nearest chunk matches, sum scores per source
//! URL (a page with several relevant chunks should rank above one with a
//! single weak match), sort descending, and truncate to the caller's limit.

use std::collections::HashMap;

use axum::extract::{Query, State};
use axum::Json;

use crate::dto::{SearchQuery, SearchResult};
use crate::errors::ApiError;
use crate::state::AppState;

/// Number of raw chunk matches fetched from the vector store before
/// aggregating by source URL, matching the original's `match_limit=50`.
const RAW_MATCH_LIMIT: u64 = 50;

/// `GET /search?q=...&limit=...`: semantic search over crawled pages.
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<Vec<SearchResult>>, ApiError> {
    let query_vector = state
        .embedder
        .embed(vec![params.q.clone()])
        .await
        .map_err(ApiError::from)?
        .into_iter()
        .next()
        .ok_or_else(|| ApiError::Internal("embedder returned no vector for query".to_string()))?;

    let matches = state
        .vectors
        .search(query_vector, RAW_MATCH_LIMIT)
        .await
        .map_err(ApiError::from)?;

    let mut scores: HashMap<String, f32> = HashMap::new();
    for hit in matches {
        *scores.entry(hit.url).or_insert(0.0) += hit.score;
    }

    let mut ranked: Vec<SearchResult> = scores
        .into_iter()
        .map(|(url, score)| SearchResult { url, score })
        .collect();
    ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    ranked.truncate(params.limit);

    Ok(Json(ranked))
}
