//! URL canonicalization, relative resolution, and whitelist filtering.
//!
//! Grounded on the original crawler's `app/core/utility.py` (`clean_urls`,
//! `handle_relative_url`, `get_base_site`) and `app/core/crawl.py`'s
//! `pattern_filter`, translated from `urlparse`/`re.search` into the `url`
//! and `regex` crates.

use std::collections::HashSet;

use meridian_types::{MeridianError, Result};
use url::Url;

/// Canonicalize a URL: drop any fragment and query string, and strip a
/// trailing `/` from the path (except for the bare root, which keeps none).
///
/// Idempotent: `canonicalize(canonicalize(u)?) == canonicalize(u)?`.
pub fn canonicalize(raw: &str) -> Result<String> {
    let mut parsed = Url::parse(raw).map_err(|_| MeridianError::InvalidUrl(raw.to_string()))?;
    parsed.set_fragment(None);
    parsed.set_query(None);

    let path = parsed.path().trim_end_matches('/').to_string();
    parsed.set_path(&path);

    Ok(parsed.to_string())
}

/// Does this string parse to an absolute URL with a scheme and a host?
pub fn valid_url(raw: &str) -> bool {
    Url::parse(raw).map(|u| u.has_host()).unwrap_or(false)
}

/// The origin of a URL: `scheme://host[:port]`, no path/query/fragment.
pub fn base_site(raw: &str) -> Result<String> {
    let parsed = Url::parse(raw).map_err(|_| MeridianError::InvalidUrl(raw.to_string()))?;
    parsed
        .host_str()
        .map(|host| match parsed.port() {
            Some(port) => format!("{}://{}:{}", parsed.scheme(), host, port),
            None => format!("{}://{}", parsed.scheme(), host),
        })
        .ok_or_else(|| MeridianError::InvalidUrl(raw.to_string()))
}

/// Resolve a discovered `href` relative to the page it was found on.
///
/// Three cases, matching `handle_relative_url`:
/// - `href` is already absolute (has its own scheme/host): returned as-is.
/// - `href` starts with `/`: resolved against `base_site`, the origin of
///   the whole site rather than the current page's directory.
/// - otherwise: resolved against the directory of `current_url` (i.e. the
///   standard relative-URL resolution rule).
pub fn resolve(href: &str, current_url: &str, base_site: &str) -> Result<String> {
    if let Ok(parsed) = Url::parse(href) {
        if parsed.has_host() {
            return Ok(parsed.to_string());
        }
    }

    if let Some(path) = href.strip_prefix('/') {
        let base = Url::parse(base_site).map_err(|_| MeridianError::InvalidUrl(base_site.to_string()))?;
        return base
            .join(&format!("/{}", path))
            .map(|u| u.to_string())
            .map_err(|_| MeridianError::InvalidUrl(href.to_string()));
    }

    let current = Url::parse(current_url).map_err(|_| MeridianError::InvalidUrl(current_url.to_string()))?;
    current
        .join(href)
        .map(|u| u.to_string())
        .map_err(|_| MeridianError::InvalidUrl(href.to_string()))
}

/// Canonicalize and deduplicate a batch of discovered URLs, dropping any
/// that fail to parse.
pub fn dedup(urls: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for raw in urls {
        if let Ok(canonical) = canonicalize(&raw) {
            if seen.insert(canonical.clone()) {
                out.push(canonical);
            }
        }
    }
    out
}

/// Keep only the URLs that contain at least one of the given regex patterns
/// as a substring match, mirroring Python's `re.search` (not full-match)
/// semantics used by the original `pattern_filter`.
pub fn whitelist_filter(urls: &[String], patterns: &[String]) -> Result<Vec<String>> {
    let compiled: std::result::Result<Vec<regex::Regex>, regex::Error> =
        patterns.iter().map(|p| regex::Regex::new(p)).collect();
    let compiled = compiled.map_err(|e| MeridianError::InvalidInput(e.to_string()))?;

    Ok(urls
        .iter()
        .filter(|url| compiled.iter().any(|re| re.is_match(url)))
        .cloned()
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonicalize_strips_fragment_query_and_trailing_slash() {
        let c = canonicalize("https://example.com/a/b/?x=1#frag").unwrap();
        assert_eq!(c, "https://example.com/a/b");
    }

    #[test]
    fn canonicalize_root_path_has_no_trailing_slash_artifact() {
        let c = canonicalize("https://example.com/").unwrap();
        assert_eq!(c, "https://example.com/");
    }

    #[test]
    fn canonicalize_is_idempotent() {
        let once = canonicalize("https://example.com/a/b/?x=1#frag").unwrap();
        let twice = canonicalize(&once).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn base_site_drops_path() {
        assert_eq!(base_site("https://example.com/a/b?x=1").unwrap(), "https://example.com");
    }

    #[test]
    fn base_site_keeps_non_default_port() {
        assert_eq!(base_site("http://example.com:8080/a").unwrap(), "http://example.com:8080");
    }

    #[test]
    fn resolve_absolute_href_is_unchanged() {
        let r = resolve("https://other.com/x", "https://example.com/a/b", "https://example.com").unwrap();
        assert_eq!(r, "https://other.com/x");
    }

    #[test]
    fn resolve_root_relative_href_uses_base_site() {
        let r = resolve("/c/d", "https://example.com/a/b", "https://example.com").unwrap();
        assert_eq!(r, "https://example.com/c/d");
    }

    #[test]
    fn resolve_plain_relative_href_uses_current_directory() {
        let r = resolve("c", "https://example.com/a/b", "https://example.com").unwrap();
        assert_eq!(r, "https://example.com/a/c");
    }

    #[test]
    fn dedup_drops_duplicates_after_canonicalization() {
        let urls = vec![
            "https://example.com/a/".to_string(),
            "https://example.com/a?x=1".to_string(),
            "https://example.com/b".to_string(),
        ];
        assert_eq!(dedup(urls).len(), 2);
    }

    #[test]
    fn whitelist_filter_keeps_only_matching_substrings() {
        let urls = vec!["https://example.com/a".to_string(), "https://other.com/b".to_string()];
        let patterns = vec!["example\\.com".to_string()];
        let kept = whitelist_filter(&urls, &patterns).unwrap();
        assert_eq!(kept, vec!["https://example.com/a".to_string()]);
    }

    #[test]
    fn whitelist_filter_is_monotonic_in_pattern_count() {
        let urls = vec!["https://example.com/a".to_string(), "https://other.com/b".to_string()];
        let one_pattern = whitelist_filter(&urls, &["example\\.com".to_string()]).unwrap();
        let two_patterns =
            whitelist_filter(&urls, &["example\\.com".to_string(), "other\\.com".to_string()]).unwrap();
        assert!(two_patterns.len() >= one_pattern.len());
    }

    #[test]
    fn valid_url_rejects_missing_host() {
        assert!(!valid_url("not a url"));
        assert!(valid_url("https://example.com"));
    }
}
