//! Concurrency-safe set of canonical URLs already queued or crawled.
//!
//! The original crawler's `AsyncList` guarded a plain `list` with an
//! `asyncio.Lock` and did a linear `in` scan on every insert. `DashMap`
//! gives the same "one writer at a time per shard" safety with O(1)
//! lookups, which matters once a crawl has seen tens of thousands of URLs.

use dashmap::DashSet;

/// Tracks every canonical URL the crawl has already enqueued, so the same
/// URL is never queued twice.
#[derive(Default)]
pub struct SeenSet {
    inner: DashSet<String>,
}

impl SeenSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the set from URLs already known at startup (e.g. every URL
    /// already present in `resources`), so the Fetcher never re-queues
    /// them as if they were new.
    pub fn seeded(urls: impl IntoIterator<Item = String>) -> Self {
        let inner = DashSet::new();
        for url in urls {
            inner.insert(url);
        }
        Self { inner }
    }

    /// Mark `url` as seen. Returns `true` if it was newly inserted, `false`
    /// if it was already present.
    pub fn insert(&self, url: String) -> bool {
        self.inner.insert(url)
    }

    /// Has this URL already been seen?
    pub fn contains(&self, url: &str) -> bool {
        self.inner.contains(url)
    }

    /// Number of URLs tracked.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Is the set empty?
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_reports_novelty() {
        let seen = SeenSet::new();
        assert!(seen.insert("https://example.com".into()));
        assert!(!seen.insert("https://example.com".into()));
    }

    #[test]
    fn seeded_set_pre_populates_membership() {
        let seen = SeenSet::seeded(["https://example.com".to_string()]);
        assert!(seen.contains("https://example.com"));
        assert!(!seen.insert("https://example.com".into()));
    }
}
