//! Vector-store record shapes exchanged with `meridian-vectors`.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The payload stored alongside a vector in the `embeddings` collection.
///
/// Mirrors the original implementation's `payload={"text": metadata}` shape
/// exactly (`storage.py::store_embedding`): the source URL is nested under
/// a `text` object rather than stored flat, since `search.py` reads it back
/// as `match.payload["text"]["url"]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbeddingPayload {
    /// The `text` object every embedding payload carries.
    pub text: EmbeddingText,
}

/// The metadata nested under `payload.text`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbeddingText {
    /// The source page this chunk's vector was derived from.
    pub url: String,
}

/// A single embedded text chunk, ready to upsert into the vector store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingRecord {
    /// Point id. Freshly generated per chunk; chunks are never updated in
    /// place, only added, since re-embedding is out of scope.
    pub id: Uuid,
    /// Dense embedding, expected to be 384-dimensional for the configured model.
    pub vector: Vec<f32>,
    /// Metadata carried alongside the vector.
    pub payload: EmbeddingPayload,
}

impl EmbeddingRecord {
    /// Build a new record with a freshly generated point id.
    pub fn new(vector: Vec<f32>, url: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            vector,
            payload: EmbeddingPayload {
                text: EmbeddingText { url: url.into() },
            },
        }
    }
}
