//! # Meridian Fetch
//!
//! A thin HTTP client wrapper for the crawl Fetcher.
//!
//! Unlike `riptide-fetch`'s `ReliableHttpClient` (retry + circuit breaker),
//! this client deliberately has neither: the crawl pipeline treats a failed
//! or non-200 fetch as "skip this URL and move on", never as "retry later",
//! so there is nothing for a circuit breaker to protect against repeatedly
//! re-tripping.

use std::time::Duration;

use tracing::{instrument, warn};

/// Timeout applied to every fetch, matching the original crawler's
/// `client.get(url, timeout=7)`.
const FETCH_TIMEOUT: Duration = Duration::from_secs(7);

const USER_AGENT: &str = concat!("meridian-fetch/", env!("CARGO_PKG_VERSION"));

/// Outcome of attempting to fetch a single URL.
#[derive(Debug)]
pub enum FetchOutcome {
    /// The page was fetched with a 200 status; body is the raw HTML.
    Html(String),
    /// The fetch did not yield usable HTML. The Fetcher logs this and
    /// continues to the next queued URL rather than retrying.
    Skipped {
        /// Human-readable reason, for logging.
        reason: String,
    },
}

/// HTTP client used by the Fetcher worker to retrieve pages.
#[derive(Clone)]
pub struct PageFetcher {
    client: reqwest::Client,
}

impl PageFetcher {
    /// Build a fetcher with a bounded timeout and redirect-following enabled.
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(FETCH_TIMEOUT)
            .build()
            .expect("reqwest client configuration is valid");
        Self { client }
    }

    /// Fetch a URL. Returns [`FetchOutcome::Skipped`] for anything short of
    /// a 200 response with a body, rather than surfacing an error: a single
    /// bad page must never halt the crawl loop.
    #[instrument(skip(self), fields(url = %url))]
    pub async fn fetch(&self, url: &str) -> FetchOutcome {
        let response = match self.client.get(url).send().await {
            Ok(resp) => resp,
            Err(err) => {
                warn!(error = %err, "fetch failed");
                return FetchOutcome::Skipped {
                    reason: err.to_string(),
                };
            }
        };

        if response.status() != reqwest::StatusCode::OK {
            let status = response.status();
            warn!(%status, "non-200 response");
            return FetchOutcome::Skipped {
                reason: format!("status {status}"),
            };
        }

        match response.text().await {
            Ok(body) => FetchOutcome::Html(body),
            Err(err) => {
                warn!(error = %err, "failed to read response body");
                FetchOutcome::Skipped {
                    reason: err.to_string(),
                }
            }
        }
    }
}

impl Default for PageFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn fetch_returns_html_on_200() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/page"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
            .mount(&server)
            .await;

        let fetcher = PageFetcher::new();
        let outcome = fetcher.fetch(&format!("{}/page", server.uri())).await;
        match outcome {
            FetchOutcome::Html(body) => assert_eq!(body, "<html></html>"),
            FetchOutcome::Skipped { reason } => panic!("expected html, got skip: {reason}"),
        }
    }

    #[tokio::test]
    async fn fetch_skips_on_non_200() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let fetcher = PageFetcher::new();
        let outcome = fetcher.fetch(&format!("{}/missing", server.uri())).await;
        assert!(matches!(outcome, FetchOutcome::Skipped { .. }));
    }

    #[tokio::test]
    async fn fetch_skips_on_connection_error() {
        let fetcher = PageFetcher::new();
        let outcome = fetcher.fetch("http://127.0.0.1:1").await;
        assert!(matches!(outcome, FetchOutcome::Skipped { .. }));
    }
}
