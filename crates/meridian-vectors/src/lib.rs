//! # Meridian Vectors
//!
//! A thin wrapper over `qdrant-client` for the `embeddings` collection: one
//! point per text chunk, payload carrying the source URL.

use std::collections::HashMap;
use std::sync::Arc;

use qdrant_client::qdrant::{
    CreateCollectionBuilder, Distance, PointStruct, ScoredPoint, SearchPointsBuilder,
    UpsertPointsBuilder, VectorParamsBuilder,
};
use qdrant_client::Qdrant;
use tracing::instrument;

use meridian_types::{EmbeddingRecord, MeridianError, Result};

/// Name of the collection all page-chunk embeddings live in.
const COLLECTION: &str = "embeddings";

/// Dimensionality of the configured embedding model (BGE-small / similar).
const VECTOR_SIZE: u64 = 384;

/// Handle to the Qdrant vector store.
#[derive(Clone)]
pub struct VectorStore {
    client: Arc<Qdrant>,
}

/// A single search hit: the URL a matching chunk came from, and its score.
#[derive(Debug, Clone)]
pub struct ScoredMatch {
    /// Source URL of the matching chunk.
    pub url: String,
    /// Cosine similarity score reported by Qdrant.
    pub score: f32,
}

impl VectorStore {
    /// Connect to a Qdrant instance at `url` (e.g. `http://localhost:6334`).
    pub async fn connect(url: &str) -> Result<Self> {
        let client = Qdrant::from_url(url)
            .build()
            .map_err(|e| MeridianError::VectorStore(e.to_string()))?;
        Ok(Self {
            client: Arc::new(client),
        })
    }

    /// Create the `embeddings` collection if it doesn't already exist.
    #[instrument(skip(self))]
    pub async fn ensure_collection(&self) -> Result<()> {
        let exists = self
            .client
            .collection_exists(COLLECTION)
            .await
            .map_err(|e| MeridianError::VectorStore(e.to_string()))?;
        if exists {
            return Ok(());
        }

        self.client
            .create_collection(
                CreateCollectionBuilder::new(COLLECTION)
                    .vectors_config(VectorParamsBuilder::new(VECTOR_SIZE, Distance::Cosine)),
            )
            .await
            .map_err(|e| MeridianError::VectorStore(e.to_string()))?;
        Ok(())
    }

    /// Upsert a batch of embedded chunks.
    #[instrument(skip(self, records), fields(count = records.len()))]
    pub async fn upsert(&self, records: Vec<EmbeddingRecord>) -> Result<()> {
        let points: Vec<PointStruct> = records
            .into_iter()
            .map(|record| {
                // Nested to match the original's `payload={"text": metadata}`
                // shape (spec §4.3, §6: "points carry `payload.text.url`").
                let mut text = HashMap::new();
                text.insert("url".to_string(), record.payload.text.url.into());
                let mut payload = HashMap::new();
                payload.insert("text".to_string(), text.into());
                PointStruct::new(record.id.to_string(), record.vector, payload)
            })
            .collect();

        self.client
            .upsert_points(UpsertPointsBuilder::new(COLLECTION, points).wait(true))
            .await
            .map_err(|e| MeridianError::VectorStore(e.to_string()))?;
        Ok(())
    }

    /// Find the `limit` chunks closest to `vector`.
    #[instrument(skip(self, vector))]
    pub async fn search(&self, vector: Vec<f32>, limit: u64) -> Result<Vec<ScoredMatch>> {
        let response = self
            .client
            .search_points(SearchPointsBuilder::new(COLLECTION, vector, limit).with_payload(true))
            .await
            .map_err(|e| MeridianError::VectorStore(e.to_string()))?;

        Ok(response
            .result
            .into_iter()
            .filter_map(ScoredMatch::from_scored_point)
            .collect())
    }
}

impl ScoredMatch {
    fn from_scored_point(point: ScoredPoint) -> Option<Self> {
        let url = point
            .payload
            .get("text")?
            .as_struct()?
            .fields
            .get("url")?
            .as_str()?
            .to_string();
        Some(Self {
            url,
            score: point.score,
        })
    }
}
