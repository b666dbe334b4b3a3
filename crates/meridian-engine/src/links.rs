//! Link discovery from a fetched page's anchor tags.
//!
//! Grounded on the original crawler's link-handling in `crawl.py` (resolve
//! each `<a href>` relative to the current page, then hand the resolved
//! list to the whitelist filter) and `process.py`'s external-link
//! classification (`href` non-empty, not `#`-prefixed, and not pointing
//! back at the page's own site).

use scraper::{Html, Selector};

use meridian_utils::resolve;

/// Links discovered on a single fetched page.
pub struct DiscoveredLinks {
    /// Every resolved, in-document link, a candidate for the crawl frontier.
    pub all: Vec<String>,
    /// The subset that point at a different origin than `base_site`.
    pub external: Vec<String>,
}

/// Scan `html` for anchor tags and resolve their `href`s against the page
/// they were found on.
pub fn discover_links(html: &str, current_url: &str, base_site: &str) -> DiscoveredLinks {
    let document = Html::parse_document(html);
    let selector = Selector::parse("a").expect("static selector is valid");

    let mut all = Vec::new();
    let mut external = Vec::new();

    for anchor in document.select(&selector) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        if href.is_empty() || href.starts_with('#') {
            continue;
        }

        let Ok(resolved) = resolve(href, current_url, base_site) else {
            continue;
        };

        let is_external = !href.starts_with('/') && !href.contains(base_site);
        if is_external {
            external.push(resolved.clone());
        }
        all.push(resolved);
    }

    DiscoveredLinks { all, external }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discover_links_resolves_relative_and_absolute_hrefs() {
        let html = r#"
            <html><body>
                <a href="/about">About</a>
                <a href="contact">Contact</a>
                <a href="https://other.com/page">Other site</a>
                <a href="#section">Anchor only</a>
                <a href="">Empty</a>
            </body></html>
        "#;
        let discovered = discover_links(html, "https://example.com/dir/page", "https://example.com");
        assert_eq!(
            discovered.all,
            vec![
                "https://example.com/about".to_string(),
                "https://example.com/dir/contact".to_string(),
                "https://other.com/page".to_string(),
            ]
        );
    }

    #[test]
    fn discover_links_classifies_external_links() {
        let html = r#"
            <html><body>
                <a href="/internal">Internal</a>
                <a href="https://other.com/page">External</a>
            </body></html>
        "#;
        let discovered = discover_links(html, "https://example.com/dir/page", "https://example.com");
        assert_eq!(discovered.external, vec!["https://other.com/page".to_string()]);
    }
}
