//! Orchestrator: seeds the crawl frontier from persisted state, spawns the
//! Fetcher and Processor, and tears both down when the crawl ends.
//!
//! Grounded on the original crawler's `gather.py::gather`: it builds the
//! queues, the `seen_urls` set, the httpx client, and the regex whitelist;
//! fetches already-crawled urls from `resources` and splits them into
//! `retry_urls` (due for revisit, re-enqueued) and `remaining_urls`
//! (folded straight into the seen set) exactly as `gather()` does with its
//! `revisit_delta` parameter; spawns the Processor task, runs the Fetcher,
//! and signals `end` once both exit. Two deliberate departures, both
//! called out in the project's design notes: the default whitelist here is
//! each seed site's base origin (the original reused `retry_urls` for this
//! by what looks like an oversight), and `resources` rows are upserted
//! rather than only ever inserted.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use meridian_embed::Embedder;
use meridian_fetch::PageFetcher;
use meridian_persistence::{PotentialUrlRepository, ResourceRepository, SeedSiteRepository};
use meridian_types::{MeridianError, Result};
use meridian_utils::{base_site, canonicalize};
use meridian_vectors::VectorStore;
use tracing::info;

use crate::fetcher::{self, FetcherConfig};
use crate::lifecycle::LifecycleController;
use crate::processor::{self, ProcessorConfig};
use crate::queue::{page_channel, url_channel};
use crate::seen::SeenSet;
use crate::text::DEFAULT_CHUNK_WORDS;
use meridian_events::{CrawlEvent, EventPublisher};

/// Default minimum age of `last_visited` before a crawled URL re-enters the
/// frontier, matching the original crawler's `gather()` default of
/// `timedelta(days=1)`.
pub const DEFAULT_REVISIT_DELTA: Duration = Duration::hours(24);

/// Per-run overrides. Every field has a sensible default derived from
/// persisted seed sites, so an empty `RunOptions::default()` is a valid
/// "just crawl everything configured" request.
#[derive(Clone, Default)]
pub struct RunOptions {
    /// Explicit whitelist regex patterns. When `None`, defaults to each
    /// seed site's base origin.
    pub whitelist_patterns: Option<Vec<String>>,
    /// Caps how many URLs the Fetcher and Processor each process, mainly
    /// for tests and bounded demo runs. `None` runs until the lifecycle ends.
    pub max_iterations: Option<u64>,
    /// Word-window size for chunking page text before embedding.
    pub chunk_words: Option<usize>,
    /// Minimum age of `last_visited` before a previously crawled URL
    /// re-enters the frontier. `None` defaults to [`DEFAULT_REVISIT_DELTA`].
    pub revisit_delta: Option<Duration>,
}

/// Owns every dependency the crawl pipeline needs and wires them together.
#[derive(Clone)]
pub struct Orchestrator {
    seed_sites: SeedSiteRepository,
    resources: ResourceRepository,
    potential_urls: PotentialUrlRepository,
    vectors: VectorStore,
    embedder: Embedder,
    client: PageFetcher,
}

impl Orchestrator {
    /// Build an orchestrator from its already-constructed dependencies.
    pub fn new(
        seed_sites: SeedSiteRepository,
        resources: ResourceRepository,
        potential_urls: PotentialUrlRepository,
        vectors: VectorStore,
        embedder: Embedder,
        client: PageFetcher,
    ) -> Self {
        Self {
            seed_sites,
            resources,
            potential_urls,
            vectors,
            embedder,
            client,
        }
    }

    /// Run one full crawl: seed the frontier, spawn workers, and block
    /// until both exit (either because the frontier and its discovered
    /// links are exhausted, or because `lifecycle` was moved to `Ended`).
    pub async fn run(
        &self,
        options: RunOptions,
        lifecycle: LifecycleController,
        events: EventPublisher,
    ) -> Result<()> {
        self.vectors.ensure_collection().await?;

        let seeds = self.seed_sites.list().await?;
        let already_crawled = self.resources.list_urls().await?;

        let revisit_delta = options.revisit_delta.unwrap_or(DEFAULT_REVISIT_DELTA);
        let now = Utc::now();
        let (due_for_revisit, still_fresh): (Vec<(String, DateTime<Utc>)>, Vec<(String, DateTime<Utc>)>) =
            already_crawled
                .into_iter()
                .partition(|(_, last_visited)| now - *last_visited > revisit_delta);

        // URLs not due for revisit must never be re-enqueued this run; URLs
        // due for revisit start unseen so the frontier seeding below queues
        // them exactly once, same as any freshly discovered URL.
        let seen = Arc::new(SeenSet::seeded(still_fresh.into_iter().map(|(url, _)| url)));

        let whitelist_patterns = match options.whitelist_patterns {
            Some(patterns) => patterns,
            None => seeds
                .iter()
                .filter_map(|site| base_site(&site.url).ok())
                .map(|origin| regex::escape(&origin))
                .collect(),
        };

        let (url_tx, url_rx) = url_channel();
        let (page_tx, page_rx) = page_channel();

        let fetcher_config = FetcherConfig {
            whitelist_patterns,
            max_iterations: options.max_iterations,
        };
        let processor_config = ProcessorConfig {
            max_iterations: options.max_iterations,
            chunk_words: options.chunk_words.unwrap_or(DEFAULT_CHUNK_WORDS),
        };

        let fetcher_task = tokio::spawn(fetcher::run(
            url_rx,
            url_tx.clone(),
            page_tx,
            self.client.clone(),
            seen.clone(),
            lifecycle.handle(),
            events.clone(),
            fetcher_config,
            self.potential_urls.clone(),
        ));

        let processor_task = tokio::spawn(processor::run(
            page_rx,
            self.embedder.clone(),
            self.vectors.clone(),
            self.resources.clone(),
            lifecycle.handle(),
            events.clone(),
            processor_config,
        ));

        events.publish(CrawlEvent::Started);

        let mut seeded_count = 0usize;
        for site in &seeds {
            for raw in site.frontier_urls() {
                let Ok(canonical) = canonicalize(&raw) else {
                    continue;
                };
                if seen.insert(canonical.clone()) {
                    if url_tx.send(canonical).is_err() {
                        break;
                    }
                    seeded_count += 1;
                }
            }
        }

        let mut revisit_count = 0usize;
        for (url, _) in due_for_revisit {
            if seen.insert(url.clone()) {
                if url_tx.send(url).is_err() {
                    break;
                }
                revisit_count += 1;
            }
        }

        info!(seeded_count, revisit_count, "seeded initial crawl frontier");
        drop(url_tx);

        let (fetcher_result, processor_result) = tokio::join!(fetcher_task, processor_task);
        fetcher_result.map_err(MeridianError::other)?;
        processor_result.map_err(MeridianError::other)?;

        let _ = lifecycle.end();
        events.publish(CrawlEvent::Ended);
        Ok(())
    }
}
