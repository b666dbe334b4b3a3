//! Shared application state injected into every handler via axum's
//! `State` extractor.

use std::sync::Arc;

use meridian_embed::Embedder;
use meridian_engine::{CrawlRegistry, Orchestrator};
use meridian_events::EventPublisher;
use meridian_persistence::{AdminRepository, PotentialUrlRepository, ResourceRepository, SeedSiteRepository};
use meridian_vectors::VectorStore;

use crate::config::AppConfig;

/// Everything a handler might need: config, repositories, the vector
/// store, and a handle onto the crawl pipeline's lifecycle and event bus.
#[derive(Clone)]
pub struct AppState {
    /// Immutable configuration loaded once at startup.
    pub config: Arc<AppConfig>,
    /// Admin account storage.
    pub admins: AdminRepository,
    /// Seed-site CRUD storage.
    pub seed_sites: SeedSiteRepository,
    /// Crawled-resource storage.
    pub resources: ResourceRepository,
    /// Potential-url storage.
    pub potential_urls: PotentialUrlRepository,
    /// Vector store for semantic search.
    pub vectors: VectorStore,
    /// Embedding model, used by the search endpoint to embed queries.
    pub embedder: Embedder,
    /// The crawl pipeline, spawned on demand by the crawl-control routes.
    pub orchestrator: Orchestrator,
    /// Tracks the lifecycle controller for whichever crawl is currently
    /// running (or most recently ran). `/crawl/start` creates a fresh
    /// controller per run; `/crawl/{stop,pause,resume}` act on whichever
    /// one is current.
    pub lifecycle: CrawlRegistry,
    /// Status event bus for the crawl pipeline.
    pub events: EventPublisher,
}
