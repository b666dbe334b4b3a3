//! In-flight page records handed from the Fetcher to the Processor.

use serde::{Deserialize, Serialize};

/// The kind of resource a fetched page represents.
///
/// Only `Webpage` exists today; the enum exists so the parsed-page queue's
/// wire shape doesn't need to change if a second resource kind (e.g. `Pdf`)
/// is added later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageKind {
    /// An HTML document.
    Webpage,
}

/// A fetched page, parsed and queued for the Processor.
///
/// `html` carries the raw document rather than a parsed DOM handle: `scraper::Html`
/// borrows from nothing and owns its own string, so passing the source text
/// across the channel and re-parsing on the Processor side avoids threading
/// a non-`Send`-friendly tree type through `tokio::sync::mpsc`.
#[derive(Debug, Clone)]
pub struct ParsedPage {
    /// The resource kind.
    pub kind: PageKind,
    /// Raw HTML document body.
    pub html: String,
    /// The canonical URL this page was fetched from.
    pub source_url: String,
    /// Links discovered on this page that point outside its own origin,
    /// computed once by the Fetcher so the Processor doesn't need to
    /// re-parse the document to persist them alongside the resource row.
    pub external_links: Vec<String>,
}

impl ParsedPage {
    /// Build a freshly fetched webpage record.
    pub fn webpage(
        html: impl Into<String>,
        source_url: impl Into<String>,
        external_links: Vec<String>,
    ) -> Self {
        Self {
            kind: PageKind::Webpage,
            html: html.into(),
            source_url: source_url.into(),
            external_links,
        }
    }
}
