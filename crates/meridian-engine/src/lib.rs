//! # Meridian Engine
//!
//! The crawl/index pipeline core: a Fetcher and a Processor cooperating
//! over bounded queues and a shared [`lifecycle::LifecycleController`],
//! orchestrated end to end by [`orchestrator::Orchestrator`].

pub mod fetcher;
pub mod lifecycle;
pub mod links;
pub mod orchestrator;
pub mod processor;
pub mod queue;
pub mod seen;
pub mod text;

pub use lifecycle::{CrawlRegistry, LifecycleController, LifecycleHandle, LifecycleState};
pub use orchestrator::{Orchestrator, RunOptions};
pub use seen::SeenSet;
