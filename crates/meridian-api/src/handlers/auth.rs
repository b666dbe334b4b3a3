//! Login and admin-account bootstrap handlers.
//!
//! Grounded on the original crawler's `app/auth/auth.py::set_credentials`
//! and `check_credentials`: the first admin account may be created with no
//! token at all (the table is empty), and every subsequent one requires an
//! already-authenticated caller. `/admins` is excluded from the blanket
//! `require_auth` middleware for exactly this reason — its auth requirement
//! is conditional, so `create_initial_admin` applies it itself via
//! `auth::require_bearer`.

use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::Html;
use axum::Json;

use crate::auth::{create_access_token, hash_password, require_bearer, verify_password};
use crate::dto::{LoginData, TokenResponse};
use crate::errors::ApiError;
use crate::state::AppState;

const ADMIN_PAGE: &str = include_str!("../../static/admin.html");

/// `POST /login`: exchange admin credentials for a bearer token.
pub async fn login(State(state): State<AppState>, Json(body): Json<LoginData>) -> Result<Json<TokenResponse>, ApiError> {
    let admin = state
        .admins
        .find_by_username(&body.username)
        .await?
        .ok_or(ApiError::Unauthorized)?;

    if !verify_password(&body.password, &admin.password_hash)? {
        return Err(ApiError::Unauthorized);
    }

    let token = create_access_token(
        &admin.username,
        &state.config.secret_key,
        &state.config.algorithm,
        state.config.token_lifetime_minutes,
    )?;

    Ok(Json(TokenResponse {
        token,
        token_type: "bearer".to_string(),
    }))
}

/// `GET /get-admin`: the static admin HTML page. Gated by the blanket
/// `require_auth` middleware like any other operator route — unlike
/// `/login` and `/admins`, it carries no bootstrap exception.
pub async fn get_admin_page() -> Html<&'static str> {
    Html(ADMIN_PAGE)
}

/// `POST /admins`: create an admin account. Permitted with no token while
/// the admins table is empty (bootstrapping the first account); once any
/// admin exists, the caller must present a valid bearer token.
pub async fn create_initial_admin(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<LoginData>,
) -> Result<Json<TokenResponse>, ApiError> {
    if !state.admins.is_empty().await? {
        require_bearer(&headers, &state)?;
    }

    let password_hash = hash_password(&body.password)?;
    state.admins.create(&body.username, &password_hash).await?;

    let token = create_access_token(
        &body.username,
        &state.config.secret_key,
        &state.config.algorithm,
        state.config.token_lifetime_minutes,
    )?;

    Ok(Json(TokenResponse {
        token,
        token_type: "bearer".to_string(),
    }))
}
