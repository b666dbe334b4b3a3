//! Seed-site CRUD handlers.

use axum::extract::State;
use axum::Json;

use crate::dto::{SeedAddDeleteData, SeedSiteResponse, SeedUpdateData, SeedUrlRequest, UrlDeleteData, UrlUpdateData};
use crate::errors::ApiError;
use crate::state::AppState;

/// `GET /seeds`: list every configured seed site.
pub async fn list_seeds(State(state): State<AppState>) -> Result<Json<Vec<SeedSiteResponse>>, ApiError> {
    let sites = state.seed_sites.list().await?;
    Ok(Json(sites.into_iter().map(Into::into).collect()))
}

/// `POST /seeds`: register a new seed site.
pub async fn add_seed(State(state): State<AppState>, Json(body): Json<SeedUrlRequest>) -> Result<(), ApiError> {
    state.seed_sites.add(&body.url, &body.seeds).await?;
    Ok(())
}

/// `DELETE /seeds`: remove a seed site.
pub async fn delete_seed(State(state): State<AppState>, Json(body): Json<UrlDeleteData>) -> Result<(), ApiError> {
    state.seed_sites.delete(&body.url).await?;
    Ok(())
}

/// `PUT /seeds`: rename a seed site's URL.
pub async fn update_seed_url(State(state): State<AppState>, Json(body): Json<UrlUpdateData>) -> Result<(), ApiError> {
    state.seed_sites.rename(&body.old_url, &body.url).await?;
    Ok(())
}

/// `POST /seeds/suffix`: add a path suffix to an existing seed site.
pub async fn add_seed_suffix(
    State(state): State<AppState>,
    Json(body): Json<SeedAddDeleteData>,
) -> Result<(), ApiError> {
    state.seed_sites.add_seed(&body.url, &body.seed).await?;
    Ok(())
}

/// `DELETE /seeds/suffix`: remove a path suffix from a seed site.
pub async fn delete_seed_suffix(
    State(state): State<AppState>,
    Json(body): Json<SeedAddDeleteData>,
) -> Result<(), ApiError> {
    state.seed_sites.remove_seed(&body.url, &body.seed).await?;
    Ok(())
}

/// `PUT /seeds/suffix`: rename an existing path suffix.
pub async fn update_seed_suffix(
    State(state): State<AppState>,
    Json(body): Json<SeedUpdateData>,
) -> Result<(), ApiError> {
    state
        .seed_sites
        .rename_seed(&body.url, &body.old_seed, &body.new_seed)
        .await?;
    Ok(())
}
