//! # Meridian Types
//!
//! Shared domain types and error definitions for the Meridian crawl/index
//! pipeline. This crate breaks circular dependencies between the engine,
//! persistence, vector store, and API layers by giving them a common
//! vocabulary to exchange.
//!
//! ## Organization
//!
//! - `resource`: persisted crawl metadata (`CrawledResource`, `PotentialUrl`, `SeedSite`)
//! - `embedding`: vector-store record shapes
//! - `page`: in-flight parsed-page records exchanged between Fetcher and Processor
//! - `admin`: admin-user record
//! - `errors`: the shared `MeridianError` type and `Result` alias

pub mod admin;
pub mod embedding;
pub mod errors;
pub mod page;
pub mod resource;

pub use admin::AdminUser;
pub use embedding::{EmbeddingPayload, EmbeddingRecord, EmbeddingText};
pub use errors::{MeridianError, Result};
pub use page::{PageKind, ParsedPage};
pub use resource::{CrawledResource, PotentialUrl, SeedSite};
