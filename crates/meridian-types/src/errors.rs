//! Error types shared across the Meridian crates.

use thiserror::Error;

/// Result type alias using [`MeridianError`].
pub type Result<T> = std::result::Result<T, MeridianError>;

/// Umbrella error type for Meridian operations.
///
/// Individual crates (`meridian-fetch`, `meridian-persistence`,
/// `meridian-vectors`, `meridian-engine`) define their own narrower error
/// enums and convert into this one at crate boundaries, mirroring how the
/// underlying library errors (`sqlx::Error`, `reqwest::Error`, ...) convert
/// into it here.
#[derive(Error, Debug)]
pub enum MeridianError {
    /// A URL failed to parse or was missing a scheme/host.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// URL parsing via the `url` crate failed.
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// A network/transport failure while fetching a page.
    #[error("network error: {0}")]
    Network(String),

    /// The relational store reported a failure.
    #[error("database error: {0}")]
    Database(String),

    /// The vector store reported a failure.
    #[error("vector store error: {0}")]
    VectorStore(String),

    /// The embedding model failed to encode a batch.
    #[error("embedding error: {0}")]
    Embedding(String),

    /// Requested resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The caller's input was invalid (malformed body, conflicting update).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// JSON (de)serialization failure.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Catch-all for conditions not worth a dedicated variant.
    #[error("{0}")]
    Other(String),
}

impl MeridianError {
    /// Build an [`MeridianError::Other`] from anything `Display`-able.
    pub fn other(msg: impl std::fmt::Display) -> Self {
        MeridianError::Other(msg.to_string())
    }
}
