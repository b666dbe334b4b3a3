//! Fetcher worker: pulls URLs off the frontier, fetches and parses each
//! page, discovers links, and hands parsed pages to the Processor.
//!
//! Grounded on the original crawler's `crawl.py::crawler` loop, with the
//! pause/end booleans replaced by [`crate::lifecycle`] and `seen_urls`
//! replaced by [`crate::seen::SeenSet`].

use std::sync::Arc;

use chrono::Utc;
use meridian_fetch::{FetchOutcome, PageFetcher};
use meridian_persistence::PotentialUrlRepository;
use meridian_types::ParsedPage;
use meridian_utils::{base_site, dedup, whitelist_filter};
use tracing::{info, instrument, warn};

use crate::lifecycle::{wait_while_paused_notifying, LifecycleHandle, LifecycleState};
use crate::links::discover_links;
use crate::queue::{PageSender, UrlReceiver, UrlSender};
use crate::seen::SeenSet;
use meridian_events::{CrawlEvent, EventPublisher};

/// Options controlling a single Fetcher run.
#[derive(Clone)]
pub struct FetcherConfig {
    /// Regex substrings a discovered URL must contain to enter the frontier.
    pub whitelist_patterns: Vec<String>,
    /// Stop after this many URLs have been pulled from the frontier, if set.
    /// `None` means run until the queue closes or the lifecycle ends.
    pub max_iterations: Option<u64>,
}

/// Run the Fetcher loop until the URL queue closes, the lifecycle ends, or
/// `max_iterations` is reached.
#[instrument(skip_all)]
pub async fn run(
    mut url_rx: UrlReceiver,
    url_tx: UrlSender,
    page_tx: PageSender,
    client: PageFetcher,
    seen: Arc<SeenSet>,
    mut lifecycle: LifecycleHandle,
    events: EventPublisher,
    config: FetcherConfig,
    potential_urls: PotentialUrlRepository,
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

        // Race waiting for the next URL against the lifecycle ending, so a
        // `stop-crawl` request can interrupt an idle Fetcher that's
        // blocked on an empty frontier.
        let url = tokio::select! {
            biased;
            _ = lifecycle.changed() => {
                if *lifecycle.borrow() == LifecycleState::Ended {
                    break 'outer;
                }
                continue 'outer;
            }
            maybe_url = url_rx.recv() => {
                match maybe_url {
                    Some(url) => url,
                    None => break 'outer,
                }
            }
        };
        iterations += 1;

        match client.fetch(&url).await {
            FetchOutcome::Html(html) => {
                info!(%url, "fetched page");
                events.publish(CrawlEvent::PageFetched { url: url.clone() });

                let base = base_site(&url).unwrap_or_else(|_| url.clone());
                let discovered = discover_links(&html, &url, &base);
                let external_links = discovered.external.clone();
                let candidates = dedup(discovered.all);

                match whitelist_filter(&candidates, &config.whitelist_patterns) {
                    Ok(mut whitelisted) => {
                        // Deterministic order for testability, matching the
                        // original's `addable_urls.sort()` (spec §4.2 step 5).
                        whitelisted.sort();

                        let whitelisted_set: std::collections::HashSet<&String> =
                            whitelisted.iter().collect();

                        for candidate in &whitelisted {
                            if seen.insert(candidate.clone()) && url_tx.send(candidate.clone()).is_err() {
                                break;
                            }
                        }

                        for candidate in candidates.iter().filter(|c| !whitelisted_set.contains(c)) {
                            if let Err(err) = potential_urls.observe(candidate, Utc::now()).await {
                                warn!(%candidate, error = %err, "failed to record potential url");
                            }
                        }
                    }
                    Err(err) => warn!(error = %err, "whitelist pattern compilation failed"),
                }

                let page = ParsedPage::webpage(html, url.clone(), external_links);
                if page_tx.send(page).await.is_err() {
                    break;
                }
            }
            FetchOutcome::Skipped { reason } => {
                events.publish(CrawlEvent::Skipped {
                    url: url.clone(),
                    reason,
                });
            }
        }
    }
}
