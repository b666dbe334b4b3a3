//! # Meridian API
//!
//! The admin HTTP surface: operator login, seed-site CRUD, crawl lifecycle
//! control, and semantic search. The crawl/index pipeline itself lives in
//! `meridian-engine`; this crate only exposes and guards it over HTTP.

pub mod auth;
pub mod config;
pub mod dto;
pub mod errors;
pub mod handlers;
pub mod router;
pub mod state;

pub use config::AppConfig;
pub use router::build as build_router;
pub use state::AppState;
