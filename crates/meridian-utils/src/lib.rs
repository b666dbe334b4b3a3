//! # Meridian Utils
//!
//! URL normalization and filtering helpers shared by the Fetcher and
//! Processor. These are pure functions with no I/O so they can be unit
//! tested directly against the invariants the crawl pipeline depends on
//! (canonicalization idempotence, whitelist monotonicity, ...).

pub mod url;

pub use url::{base_site, canonicalize, dedup, resolve, valid_url, whitelist_filter};
