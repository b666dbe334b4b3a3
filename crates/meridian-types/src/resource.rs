//! Persisted crawl metadata: seed sites, crawled resources, and potential urls.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An operator-curated root website plus the path suffixes that seed the
/// initial crawl frontier for it.
///
/// Invariant: `url` is well-formed (has a scheme and a host) and unique
/// across the table. Enforced by `meridian-utils::url::valid_url` at the
/// admin boundary, not by this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedSite {
    /// Database row id, if this value came from storage.
    pub id: Option<i64>,
    /// Origin URL, e.g. `https://example.com`.
    pub url: String,
    /// Ordered path suffixes appended to `url` to form initial frontier entries.
    pub seeds: Vec<String>,
}

impl SeedSite {
    /// Construct a new seed site with no persisted id.
    pub fn new(url: impl Into<String>, seeds: Vec<String>) -> Self {
        Self {
            id: None,
            url: url.into(),
            seeds,
        }
    }

    /// The initial frontier URLs contributed by this seed: the origin itself
    /// plus `origin + suffix` for every configured suffix.
    pub fn frontier_urls(&self) -> Vec<String> {
        let mut urls = Vec::with_capacity(self.seeds.len() + 1);
        urls.push(self.url.clone());
        for suffix in &self.seeds {
            urls.push(format!("{}{}", self.url, suffix));
        }
        urls
    }
}

/// A URL that has been successfully crawled at least once.
///
/// Invariant: `first_visited <= last_visited`, `all_visits >= 1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrawledResource {
    /// Database row id, if this value came from storage.
    pub id: Option<i64>,
    /// Canonical absolute URL, unique.
    pub url: String,
    /// Timestamp of the first successful crawl.
    pub first_visited: DateTime<Utc>,
    /// Timestamp of the most recent successful crawl.
    pub last_visited: DateTime<Utc>,
    /// Number of times this URL has been successfully crawled.
    pub all_visits: i32,
    /// Canonical absolute URLs linked from this page that point outside its
    /// own origin.
    pub external_links: Vec<String>,
}

impl CrawledResource {
    /// Build the record for a URL's first successful crawl.
    pub fn first_visit(url: impl Into<String>, now: DateTime<Utc>, external_links: Vec<String>) -> Self {
        Self {
            id: None,
            url: url.into(),
            first_visited: now,
            last_visited: now,
            all_visits: 1,
            external_links,
        }
    }

    /// Apply a revisit: bump `last_visited`, increment `all_visits`, and
    /// refresh the external-links snapshot. See `meridian-persistence`'s
    /// `ResourceRepository::upsert` for the persisted equivalent.
    pub fn record_revisit(&mut self, now: DateTime<Utc>, external_links: Vec<String>) {
        self.last_visited = now;
        self.all_visits += 1;
        self.external_links = external_links;
    }
}

/// A URL that has been observed (e.g. via link discovery) but filtered out
/// of the crawl frontier, and so never actually fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PotentialUrl {
    /// Database row id, if this value came from storage.
    pub id: Option<i64>,
    /// Canonical URL.
    pub url: String,
    /// Timestamp of the first time this URL was observed.
    pub first_seen: DateTime<Utc>,
    /// Number of times this URL has been re-observed.
    pub times_seen: i32,
}

impl PotentialUrl {
    /// Build the record for a URL's first observation.
    pub fn first_seen(url: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: None,
            url: url.into(),
            first_seen: now,
            times_seen: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frontier_urls_includes_origin_and_suffixes() {
        let site = SeedSite::new("https://example.com", vec!["/a".into(), "/b".into()]);
        assert_eq!(
            site.frontier_urls(),
            vec![
                "https://example.com".to_string(),
                "https://example.com/a".to_string(),
                "https://example.com/b".to_string(),
            ]
        );
    }

    #[test]
    fn frontier_urls_with_no_seeds_is_just_origin() {
        let site = SeedSite::new("https://example.com", vec![]);
        assert_eq!(site.frontier_urls(), vec!["https://example.com".to_string()]);
    }

    #[test]
    fn record_revisit_bumps_counters() {
        let t0 = Utc::now();
        let mut r = CrawledResource::first_visit("https://e.com", t0, vec![]);
        assert_eq!(r.all_visits, 1);
        assert_eq!(r.first_visited, r.last_visited);

        let t1 = t0 + chrono::Duration::days(1);
        r.record_revisit(t1, vec!["https://other.com".into()]);
        assert_eq!(r.all_visits, 2);
        assert_eq!(r.last_visited, t1);
        assert_eq!(r.first_visited, t0);
        assert_eq!(r.external_links, vec!["https://other.com".to_string()]);
    }
}
