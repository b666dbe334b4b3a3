//! Bootstrap binary: loads configuration, connects to Postgres and Qdrant,
//! loads the embedding model, and starts the admin HTTP server.
//!
//! Starting a crawl is left to the admin API (`POST /crawl/start`) rather
//! than happening automatically on boot, matching the admin surface's
//! "operator drives the crawl" model instead of the original script's
//! "the process IS the crawl" one-shot `gather()` call.

use std::sync::Arc;

use clap::Parser;
use meridian_api::{AppConfig, AppState};
use meridian_embed::Embedder;
use meridian_engine::{CrawlRegistry, Orchestrator};
use meridian_events::EventPublisher;
use meridian_fetch::PageFetcher;
use meridian_persistence::{AdminRepository, PotentialUrlRepository, ResourceRepository, SeedSiteRepository};
use meridian_vectors::VectorStore;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Command-line flags overriding environment-derived configuration.
#[derive(Parser, Debug)]
#[command(name = "meridian", about = "Semantic web crawler and search engine")]
struct Args {
    /// Override the admin server bind address (defaults to $BIND_ADDR or 0.0.0.0:8080).
    #[arg(long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let args = Args::parse();
    let mut config = AppConfig::from_env()?;
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }
    let config = Arc::new(config);

    let pool = Arc::new(meridian_persistence::connect(&config.database_url).await?);
    let admins = AdminRepository::new(pool.clone());
    let seed_sites = SeedSiteRepository::new(pool.clone());
    let resources = ResourceRepository::new(pool.clone());
    let potential_urls = PotentialUrlRepository::new(pool.clone());

    let vectors = VectorStore::connect(&config.qdrant_url).await?;
    vectors.ensure_collection().await?;

    let embedder = tokio::task::spawn_blocking(Embedder::load).await??;
    let client = PageFetcher::new();

    let orchestrator = Orchestrator::new(
        seed_sites.clone(),
        resources.clone(),
        potential_urls.clone(),
        vectors.clone(),
        embedder.clone(),
        client,
    );
    let lifecycle = CrawlRegistry::new();
    let (events, _rx) = EventPublisher::new();

    let state = AppState {
        config: config.clone(),
        admins,
        seed_sites,
        resources,
        potential_urls,
        vectors,
        embedder,
        orchestrator,
        lifecycle,
        events,
    };

    let router = meridian_api::build_router(state);
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "admin API listening");
    axum::serve(listener, router).await?;

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer())
        .init();
}
