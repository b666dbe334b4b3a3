//! API error type and its HTTP response mapping.
//!
//! Grounded on `riptide-api::errors::ApiError`: one `thiserror` enum per
//! failure mode, each mapped to a status code and a small JSON body in
//! `IntoResponse`, rather than leaking internal error text to callers.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use meridian_types::MeridianError;

/// Errors the admin API surfaces to HTTP clients.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request body failed validation.
    #[error("validation error: {0}")]
    Validation(String),
    /// No credentials, or credentials that didn't verify.
    #[error("unauthorized")]
    Unauthorized,
    /// The caller's token or credentials were well-formed but insufficient.
    #[error("forbidden")]
    Forbidden,
    /// The requested resource doesn't exist.
    #[error("not found: {0}")]
    NotFound(String),
    /// The request conflicts with existing state (duplicate seed, etc).
    #[error("conflict: {0}")]
    Conflict(String),
    /// Something downstream (database, vector store, embedder) failed.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<MeridianError> for ApiError {
    fn from(err: MeridianError) -> Self {
        match err {
            MeridianError::NotFound(msg) => ApiError::NotFound(msg),
            MeridianError::InvalidInput(msg) | MeridianError::InvalidUrl(msg) => ApiError::Validation(msg),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if matches!(self, ApiError::Unauthorized) {
            return (
                StatusCode::UNAUTHORIZED,
                [(axum::http::header::WWW_AUTHENTICATE, "Bearer")],
                Json(json!({ "error": self.to_string() })),
            )
                .into_response();
        }

        let (status, message) = match &self {
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::Unauthorized => unreachable!(),
            ApiError::Forbidden => (StatusCode::FORBIDDEN, self.to_string()),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
