//! Password hashing and JWT issuance/verification.
//!
//! Grounded on the original crawler's `app/auth/auth.py`: argon2 password
//! hashing, `jwt.encode`/`jwt.decode` with a shared secret and a 30-minute
//! default expiry. `riptide-api::middleware::auth` supplied the shape of
//! the axum middleware itself (public-path bypass, `Authorization: Bearer`
//! extraction, a structured 401 response).

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::errors::ApiError;
use crate::state::AppState;

/// JWT claims issued to an authenticated admin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Username the token was issued for.
    pub sub: String,
    /// Expiry, as Unix seconds.
    pub exp: usize,
}

/// Hash a plaintext password with argon2id.
pub fn hash_password(password: &str) -> Result<String, ApiError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| ApiError::Internal(format!("password hashing failed: {e}")))
}

/// Verify a plaintext password against a stored argon2id hash.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, ApiError> {
    let parsed = PasswordHash::new(hash).map_err(|e| ApiError::Internal(format!("stored hash is malformed: {e}")))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

fn algorithm_from_name(name: &str) -> Result<Algorithm, ApiError> {
    match name {
        "HS256" => Ok(Algorithm::HS256),
        "HS384" => Ok(Algorithm::HS384),
        "HS512" => Ok(Algorithm::HS512),
        other => Err(ApiError::Internal(format!("unsupported JWT algorithm: {other}"))),
    }
}

/// Issue a signed access token for `username`, expiring after
/// `lifetime_minutes`.
pub fn create_access_token(
    username: &str,
    secret: &str,
    algorithm: &str,
    lifetime_minutes: i64,
) -> Result<String, ApiError> {
    let alg = algorithm_from_name(algorithm)?;
    let exp = (Utc::now() + chrono::Duration::minutes(lifetime_minutes)).timestamp() as usize;
    let claims = Claims {
        sub: username.to_string(),
        exp,
    };
    encode(&Header::new(alg), &claims, &EncodingKey::from_secret(secret.as_bytes()))
        .map_err(|e| ApiError::Internal(format!("token signing failed: {e}")))
}

/// Validate and decode an access token, rejecting expired or
/// signature-mismatched tokens.
pub fn verify_access_token(token: &str, secret: &str, algorithm: &str) -> Result<Claims, ApiError> {
    let alg = algorithm_from_name(algorithm)?;
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::new(alg),
    )
    .map(|data| data.claims)
    .map_err(|_| ApiError::Unauthorized)
}

/// Axum middleware enforcing a valid bearer token on every request except
/// `/login` and `/admins`, unless the server is running in dev mode.
///
/// `/admins` is excluded here, not because it is public, but because its
/// auth requirement is conditional on admin-table state (empty table: no
/// token required; non-empty: a valid token is required) — logic the
/// handler itself applies via [`require_bearer`].
pub async fn require_auth(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let path = req.uri().path();
    if state.config.dev_mode || path == "/login" || path == "/admins" {
        return next.run(req).await;
    }

    let token = req
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));

    let Some(token) = token else {
        return unauthorized_response();
    };

    match verify_access_token(token, &state.config.secret_key, &state.config.algorithm) {
        Ok(_claims) => next.run(req).await,
        Err(_) => unauthorized_response(),
    }
}

/// Validate the `Authorization` header exactly as [`require_auth`] would,
/// for callers (like `/admins`) that need the check applied conditionally
/// rather than unconditionally via middleware.
pub fn require_bearer(headers: &axum::http::HeaderMap, state: &AppState) -> Result<(), ApiError> {
    if state.config.dev_mode {
        return Ok(());
    }
    let token = headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));
    let Some(token) = token else {
        return Err(ApiError::Unauthorized);
    };
    verify_access_token(token, &state.config.secret_key, &state.config.algorithm)?;
    Ok(())
}

fn unauthorized_response() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        [(axum::http::header::WWW_AUTHENTICATE, "Bearer")],
        Json(json!({ "error": "unauthorized", "message": "missing or invalid access token" })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_round_trip() {
        let hash = hash_password("correct horse battery staple").unwrap();
        assert!(verify_password("correct horse battery staple", &hash).unwrap());
        assert!(!verify_password("wrong password", &hash).unwrap());
    }

    #[test]
    fn token_round_trips_through_verify() {
        let token = create_access_token("alice", "test-secret", "HS256", 30).unwrap();
        let claims = verify_access_token(&token, "test-secret", "HS256").unwrap();
        assert_eq!(claims.sub, "alice");
    }

    #[test]
    fn token_rejected_with_wrong_secret() {
        let token = create_access_token("alice", "test-secret", "HS256", 30).unwrap();
        assert!(verify_access_token(&token, "other-secret", "HS256").is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let token = create_access_token("alice", "test-secret", "HS256", -1).unwrap();
        assert!(verify_access_token(&token, "test-secret", "HS256").is_err());
    }
}
