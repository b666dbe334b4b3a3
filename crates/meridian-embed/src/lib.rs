//! # Meridian Embed
//!
//! A thin async wrapper around `fastembed`'s local ONNX text encoder.
//! `fastembed::TextEmbedding::embed` is synchronous and CPU-bound, so every
//! call is pushed onto a blocking thread rather than run inline on the
//! async runtime.

use std::sync::{Arc, Mutex};

use fastembed::{EmbeddingModel as FastEmbedModel, InitOptions, TextEmbedding};
use tracing::instrument;

use meridian_types::{MeridianError, Result};

/// Dimensionality produced by the configured model. Kept in sync with
/// `meridian-vectors`'s collection config; if this model is ever swapped
/// for one with a different output size, both need updating together.
pub const VECTOR_SIZE: usize = 384;

/// A loaded sentence-embedding model.
#[derive(Clone)]
pub struct Embedder {
    inner: Arc<Mutex<TextEmbedding>>,
}

impl Embedder {
    /// Load the default model (BGE-small-en-v1.5, 384-dim), downloading its
    /// weights on first use if they aren't already cached locally.
    pub fn load() -> Result<Self> {
        let model = TextEmbedding::try_new(InitOptions::new(FastEmbedModel::BGESmallENV15))
            .map_err(|e| MeridianError::Embedding(e.to_string()))?;
        Ok(Self {
            inner: Arc::new(Mutex::new(model)),
        })
    }

    /// Encode a batch of text chunks into dense vectors, one per input.
    #[instrument(skip(self, texts), fields(count = texts.len()))]
    pub async fn embed(&self, texts: Vec<String>) -> Result<Vec<Vec<f32>>> {
        let inner = self.inner.clone();
        tokio::task::spawn_blocking(move || {
            let mut model = inner.lock().expect("embedding model mutex poisoned");
            model.embed(texts, None)
        })
        .await
        .map_err(|e| MeridianError::Embedding(e.to_string()))?
        .map_err(|e| MeridianError::Embedding(e.to_string()))
    }
}
