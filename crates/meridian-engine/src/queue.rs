//! The two queues the Fetcher and Processor cooperate over.
//!
//! The URL frontier is unbounded, per spec §4.4 ("enqueue never blocks")
//! and §5's ordering guarantee: the Fetcher is both its producer (newly
//! discovered links) and its consumer (the next URL to dequeue), so a
//! bounded channel would let it deadlock on its own `send` once the queue
//! filled — there is no other task to drain it. The parsed-page queue stays
//! bounded: it has a genuinely different producer (Fetcher) and consumer
//! (Processor), so a full queue just applies backpressure to the Fetcher,
//! per spec §5's explicit invitation to bound it.
use meridian_types::ParsedPage;
use tokio::sync::mpsc;

/// Channel capacity for the parsed-page queue.
const PAGE_QUEUE_CAPACITY: usize = 256;

/// Sending half of the URL frontier queue.
pub type UrlSender = mpsc::UnboundedSender<String>;
/// Receiving half of the URL frontier queue.
pub type UrlReceiver = mpsc::UnboundedReceiver<String>;

/// Sending half of the fetched-page queue.
pub type PageSender = mpsc::Sender<ParsedPage>;
/// Receiving half of the fetched-page queue.
pub type PageReceiver = mpsc::Receiver<ParsedPage>;

/// Construct a fresh URL frontier channel.
pub fn url_channel() -> (UrlSender, UrlReceiver) {
    mpsc::unbounded_channel()
}

/// Construct a fresh parsed-page channel.
pub fn page_channel() -> (PageSender, PageReceiver) {
    mpsc::channel(PAGE_QUEUE_CAPACITY)
}
