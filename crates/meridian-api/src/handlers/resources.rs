//! Read-only views over crawl results.

use axum::extract::State;
use axum::Json;

use crate::dto::{CrawledUrl, PotentialUrlResponse};
use crate::errors::ApiError;
use crate::state::AppState;

/// `GET /resources`: every URL that has been successfully crawled.
pub async fn list_crawled_urls(State(state): State<AppState>) -> Result<Json<Vec<CrawledUrl>>, ApiError> {
    let urls = state.resources.list_urls().await?;
    let mut out = Vec::with_capacity(urls.len());
    for (url, _) in urls {
        if let Some(resource) = state.resources.find_by_url(&url).await? {
            out.push(resource.into());
        }
    }
    Ok(Json(out))
}

/// `GET /potential-urls`: every URL discovered but filtered out of the
/// crawl frontier.
pub async fn list_potential_urls(
    State(state): State<AppState>,
) -> Result<Json<Vec<PotentialUrlResponse>>, ApiError> {
    let urls = state.potential_urls.list().await?;
    Ok(Json(urls.into_iter().map(Into::into).collect()))
}
