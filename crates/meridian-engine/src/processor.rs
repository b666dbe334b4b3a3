//! Processor worker: turns a fetched page into embedded chunks and
//! persists both the vectors and the crawl metadata.
//!
//! Grounded on the original crawler's `process.py::process` loop. That
//! function also toggled the shared `pause` event directly
//! (`pause.clear()` / `await pause.wait()` / `pause.clear()` again) as part
//! of its own body; here the Processor only *observes* lifecycle state via
//! [`crate::lifecycle`], it never mutates it, which is what makes the
//! state machine safe to share between two independent workers.

use chrono::Utc;
use meridian_embed::Embedder;
use meridian_persistence::ResourceRepository;
use meridian_types::{EmbeddingRecord, ParsedPage};
use meridian_vectors::VectorStore;
use tracing::{instrument, warn};

use crate::lifecycle::{wait_while_paused_notifying, LifecycleHandle, LifecycleState};
use crate::queue::PageReceiver;
use crate::text::{chunk_text, extract_visible_text, DEFAULT_CHUNK_WORDS};
use meridian_events::{CrawlEvent, EventPublisher};

/// Options controlling a single Processor run.
#[derive(Clone)]
pub struct ProcessorConfig {
    /// Stop after processing this many pages, if set.
    pub max_iterations: Option<u64>,
    /// Word-window size used when splitting page text before embedding.
    pub chunk_words: usize,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            max_iterations: None,
            chunk_words: DEFAULT_CHUNK_WORDS,
        }
    }
}

/// Run the Processor loop until the parsed-page queue closes, the
/// lifecycle ends, or `max_iterations` is reached.
#[instrument(skip_all)]
pub async fn run(
    mut page_rx: PageReceiver,
    embedder: Embedder,
    vectors: VectorStore,
    resources: ResourceRepository,
    mut lifecycle: LifecycleHandle,
    events: EventPublisher,
    config: ProcessorConfig,
) {
    let mut iterations: u64 = 0;

    'outer: loop {
        if *lifecycle.borrow() == LifecycleState::Ended {
            break;
        }
        wait_while_paused_notifying(&mut lifecycle, &events).await;
        if *lifecycle.borrow() == LifecycleState::Ended {
            break;
        }

        if let Some(max) = config.max_iterations {
            if iterations >= max {
                break;
            }
        }

        let page = tokio::select! {
            biased;
            _ = lifecycle.changed() => {
                if *lifecycle.borrow() == LifecycleState::Ended {
                    break 'outer;
                }
                continue 'outer;
            }
            maybe_page = page_rx.recv() => {
                match maybe_page {
                    Some(page) => page,
                    None => break 'outer,
                }
            }
        };
        iterations += 1;

        process_page(&embedder, &vectors, &resources, &events, &config, page).await;
    }
}

async fn process_page(
    embedder: &Embedder,
    vectors: &VectorStore,
    resources: &ResourceRepository,
    events: &EventPublisher,
    config: &ProcessorConfig,
    page: ParsedPage,
) {
    let text = extract_visible_text(&page.html);
    let chunks = chunk_text(&text, config.chunk_words);

    if !chunks.is_empty() {
        match embedder.embed(chunks.clone()).await {
            Ok(vecs) => {
                let records: Vec<EmbeddingRecord> = vecs
                    .into_iter()
                    .map(|vector| EmbeddingRecord::new(vector, page.source_url.clone()))
                    .collect();
                if let Err(err) = vectors.upsert(records).await {
                    warn!(url = %page.source_url, error = %err, "failed to upsert embeddings");
                }
            }
            Err(err) => warn!(url = %page.source_url, error = %err, "failed to embed page text"),
        }
    }

    match resources
        .upsert(&page.source_url, Utc::now(), &page.external_links)
        .await
    {
        Ok(()) => events.publish(CrawlEvent::PageProcessed {
            url: page.source_url,
            chunks: chunks.len(),
        }),
        Err(err) => warn!(url = %page.source_url, error = %err, "failed to upsert resource"),
    }
}
