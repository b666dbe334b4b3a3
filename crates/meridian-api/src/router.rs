//! Route table for the admin API.

use axum::middleware;
use axum::routing::{delete, get, post, put};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::auth::require_auth;
use crate::handlers::{auth, crawl, resources, search, seeds};
use crate::state::AppState;

/// Build the full admin API router.
pub fn build(state: AppState) -> Router {
    Router::new()
        .route("/login", post(auth::login))
        .route("/admins", post(auth::create_initial_admin))
        .route("/get-admin", get(auth::get_admin_page))
        .route(
            "/seeds",
            get(seeds::list_seeds)
                .post(seeds::add_seed)
                .delete(seeds::delete_seed)
                .put(seeds::update_seed_url),
        )
        .route(
            "/seeds/suffix",
            post(seeds::add_seed_suffix)
                .delete(seeds::delete_seed_suffix)
                .put(seeds::update_seed_suffix),
        )
        .route("/resources", get(resources::list_crawled_urls))
        .route("/potential-urls", get(resources::list_potential_urls))
        .route("/crawl/start", post(crawl::start_crawl))
        .route("/crawl/stop", post(crawl::stop_crawl))
        .route("/crawl/pause", post(crawl::pause_crawl))
        .route("/crawl/resume", post(crawl::resume_crawl))
        .route("/search", get(search::search))
        .layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
