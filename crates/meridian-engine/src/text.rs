//! Visible-text extraction and word-window chunking.
//!
//! Grounded on the original crawler's `extract_visible_text` (drop
//! `script`/`style`/`meta`/`header`/`footer`/`nav`/`noscript` subtrees,
//! join remaining text nodes with spaces, collapse runs of whitespace) and
//! `process_html_to_vectors` (split the joined text into fixed-size word
//! windows before embedding each one separately).

use scraper::{Html, Node};

/// Tag names whose text content is never indexed: boilerplate, not content.
const EXCLUDED_TAGS: &[&str] = &["script", "style", "meta", "header", "footer", "nav", "noscript"];

/// Default window size used by [`chunk_text`], matching the original
/// crawler's `max_length=450`.
pub const DEFAULT_CHUNK_WORDS: usize = 450;

/// Extract the visible, boilerplate-free text of an HTML document.
pub fn extract_visible_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut parts = Vec::new();

    for node in document.tree.nodes() {
        let Node::Text(text) = node.value() else {
            continue;
        };
        let excluded = node
            .ancestors()
            .any(|ancestor| matches!(ancestor.value(), Node::Element(el) if EXCLUDED_TAGS.contains(&el.name())));
        if !excluded {
            parts.push(text.trim());
        }
    }

    parts.join(" ").split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Split `text` into whitespace-joined windows of at most `max_words` words
/// each, preserving word order. An empty `text` yields no chunks.
pub fn chunk_text(text: &str, max_words: usize) -> Vec<String> {
    let words: Vec<&str> = text.split(' ').filter(|w| !w.is_empty()).collect();
    if words.is_empty() {
        return Vec::new();
    }
    words
        .chunks(max_words.max(1))
        .map(|chunk| chunk.join(" "))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_visible_text_drops_script_and_style() {
        let html = r#"
            <html><body>
                <script>var x = 1;</script>
                <style>.a { color: red; }</style>
                <p>Hello world</p>
            </body></html>
        "#;
        assert_eq!(extract_visible_text(html), "Hello world");
    }

    #[test]
    fn extract_visible_text_drops_nav_header_footer() {
        let html = r#"
            <html><body>
                <header>Site Title</header>
                <nav>Home About</nav>
                <main>Real content here</main>
                <footer>Copyright 2026</footer>
            </body></html>
        "#;
        assert_eq!(extract_visible_text(html), "Real content here");
    }

    #[test]
    fn extract_visible_text_collapses_whitespace() {
        let html = "<html><body><p>a\n\n  b   c</p></body></html>";
        assert_eq!(extract_visible_text(html), "a b c");
    }

    #[test]
    fn chunk_text_splits_into_windows() {
        let text = (0..10).map(|i| i.to_string()).collect::<Vec<_>>().join(" ");
        let chunks = chunk_text(&text, 4);
        assert_eq!(chunks, vec!["0 1 2 3", "4 5 6 7", "8 9"]);
    }

    #[test]
    fn chunk_text_of_empty_string_is_empty() {
        assert!(chunk_text("", 450).is_empty());
    }

    #[test]
    fn chunk_text_under_window_size_is_single_chunk() {
        assert_eq!(chunk_text("a b c", 450), vec!["a b c".to_string()]);
    }
}
