//! Crawl lifecycle control: start, stop, pause, and resume.

use axum::extract::State;
use axum::Json;
use tracing::{error, info};

use crate::dto::{CrawlStartRequest, CrawlStartedResponse};
use crate::errors::ApiError;
use crate::state::AppState;
use meridian_engine::RunOptions;
use meridian_events::CrawlEvent;

/// `POST /crawl/start`: seed the frontier and spawn the Fetcher/Processor.
/// Returns immediately; the crawl runs in the background for the lifetime
/// of the process.
///
/// Creates a fresh lifecycle controller for this run via `state.lifecycle`
/// (a [`meridian_engine::CrawlRegistry`]) rather than reusing one shared for
/// the process lifetime — per spec §4.1 ("the crawl may be re-invoked after
/// return") and §6 (`/start-crawl` "Create Pause+End signals"). Reusing a
/// single controller would latch to `Ended` on the first crawl's exit, and
/// the transition table allows no way back out of `Ended`.
pub async fn start_crawl(
    State(state): State<AppState>,
    Json(body): Json<CrawlStartRequest>,
) -> Result<Json<CrawlStartedResponse>, ApiError> {
    let options = RunOptions {
        whitelist_patterns: body.regex,
        max_iterations: body.max_iter,
        chunk_words: None,
        revisit_delta: None,
    };

    let orchestrator = state.orchestrator.clone();
    let lifecycle = state.lifecycle.begin();
    let events = state.events.clone();

    tokio::spawn(async move {
        info!("crawl started");
        if let Err(err) = orchestrator.run(options, lifecycle, events).await {
            error!(error = %err, "crawl run failed");
        }
    });

    Ok(Json(CrawlStartedResponse {
        message: "crawl started".to_string(),
    }))
}

/// `POST /crawl/stop`: end the crawl. Both workers exit once they next
/// check the lifecycle state.
pub async fn stop_crawl(State(state): State<AppState>) -> Result<Json<CrawlStartedResponse>, ApiError> {
    let lifecycle = state
        .lifecycle
        .current()
        .ok_or_else(|| ApiError::Conflict("no crawl has been started".to_string()))?;
    lifecycle.end().map_err(|e| ApiError::Conflict(e.to_string()))?;
    Ok(Json(CrawlStartedResponse {
        message: "crawl stopped".to_string(),
    }))
}

/// `POST /crawl/pause`: suspend both workers.
pub async fn pause_crawl(State(state): State<AppState>) -> Result<Json<CrawlStartedResponse>, ApiError> {
    let lifecycle = state
        .lifecycle
        .current()
        .ok_or_else(|| ApiError::Conflict("no crawl has been started".to_string()))?;
    lifecycle.pause().map_err(|e| ApiError::Conflict(e.to_string()))?;
    state.events.publish(CrawlEvent::PauseRequested);
    Ok(Json(CrawlStartedResponse {
        message: "crawl paused".to_string(),
    }))
}

/// `POST /crawl/resume`: resume a paused crawl.
pub async fn resume_crawl(State(state): State<AppState>) -> Result<Json<CrawlStartedResponse>, ApiError> {
    let lifecycle = state
        .lifecycle
        .current()
        .ok_or_else(|| ApiError::Conflict("no crawl has been started".to_string()))?;
    lifecycle.resume().map_err(|e| ApiError::Conflict(e.to_string()))?;
    Ok(Json(CrawlStartedResponse {
        message: "crawl resumed".to_string(),
    }))
}
