//! # Meridian Events
//!
//! A small status-broadcast channel the Orchestrator and its workers use to
//! narrate crawl progress to anyone listening (the admin API's crawl-status
//! stream, primarily). Grounded on `riptide-events::bus::EventBus`'s
//! broadcast-channel approach, but without its handler-registry machinery:
//! this pipeline has exactly one kind of subscriber.

use serde::Serialize;
use tokio::sync::broadcast;

/// Capacity of the broadcast channel. Slow subscribers that fall this far
/// behind miss older events rather than stalling the crawl.
const CHANNEL_CAPACITY: usize = 256;

/// A notable occurrence in the crawl pipeline's lifecycle.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CrawlEvent {
    /// The Orchestrator finished seeding the frontier and spawned workers.
    Started,
    /// A page was successfully fetched and parsed.
    PageFetched {
        /// The canonical URL fetched.
        url: String,
    },
    /// A page was processed into embeddings and persisted.
    PageProcessed {
        /// The canonical URL processed.
        url: String,
        /// Number of text chunks embedded for this page.
        chunks: usize,
    },
    /// A URL was skipped (fetch failure, filtered out, already seen).
    Skipped {
        /// The URL that was skipped.
        url: String,
        /// Why it was skipped.
        reason: String,
    },
    /// A pause was requested; workers are winding down in-flight work.
    PauseRequested,
    /// Both workers have suspended.
    Paused,
    /// A resume was requested after a pause.
    Resumed,
    /// The crawl ended; both workers have exited.
    Ended,
}

/// Handle for publishing [`CrawlEvent`]s.
#[derive(Clone)]
pub struct EventPublisher {
    sender: broadcast::Sender<CrawlEvent>,
}

impl EventPublisher {
    /// Create a fresh publisher and its paired subscription channel.
    pub fn new() -> (Self, broadcast::Receiver<CrawlEvent>) {
        let (sender, receiver) = broadcast::channel(CHANNEL_CAPACITY);
        (Self { sender }, receiver)
    }

    /// Subscribe another listener to this publisher's events.
    pub fn subscribe(&self) -> broadcast::Receiver<CrawlEvent> {
        self.sender.subscribe()
    }

    /// Publish an event. Ignores the case where no subscribers are
    /// currently listening; events are a best-effort narration, not a
    /// delivery-guaranteed log.
    pub fn publish(&self, event: CrawlEvent) {
        let _ = self.sender.send(event);
    }
}

impl Default for EventPublisher {
    fn default() -> Self {
        Self::new().0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscriber_receives_published_events() {
        let (publisher, mut rx) = EventPublisher::new();
        publisher.publish(CrawlEvent::Started);
        let event = rx.recv().await.unwrap();
        assert!(matches!(event, CrawlEvent::Started));
    }

    #[tokio::test]
    async fn publish_with_no_subscribers_does_not_panic() {
        let (publisher, rx) = EventPublisher::new();
        drop(rx);
        publisher.publish(CrawlEvent::Ended);
    }

    #[tokio::test]
    async fn multiple_subscribers_each_get_a_copy() {
        let (publisher, mut rx1) = EventPublisher::new();
        let mut rx2 = publisher.subscribe();
        publisher.publish(CrawlEvent::Paused);
        assert!(matches!(rx1.recv().await.unwrap(), CrawlEvent::Paused));
        assert!(matches!(rx2.recv().await.unwrap(), CrawlEvent::Paused));
    }
}
