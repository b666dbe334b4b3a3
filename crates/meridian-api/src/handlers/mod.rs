//! HTTP handlers for the admin API, grouped by the resource they act on.

pub mod auth;
pub mod crawl;
pub mod resources;
pub mod search;
pub mod seeds;
