//! # Meridian Persistence
//!
//! Typed `sqlx` repositories over the relational store. Unlike
//! `riptide-persistence`'s `PostgresRepository<T>`, which stores arbitrary
//! entities as JSONB, these repositories map onto fixed, hand-written
//! columns: the crawl pipeline's four tables (`resources`, `admins`,
//! `seed_urls`, `potential_urls`) have a small, stable shape that doesn't
//! benefit from a generic JSONB layer.

pub mod admins;
pub mod potential_urls;
pub mod resources;
pub mod seed_urls;

pub use admins::AdminRepository;
pub use potential_urls::PotentialUrlRepository;
pub use resources::ResourceRepository;
pub use seed_urls::SeedSiteRepository;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use meridian_types::Result;

/// Connect to Postgres and run pending migrations.
///
/// `database_url` is a standard `postgres://` connection string, typically
/// assembled by `meridian-api::config` from the `POSTGRES_*` environment
/// variables.
pub async fn connect(database_url: &str) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await
        .map_err(|e| meridian_types::MeridianError::Database(e.to_string()))?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(|e| meridian_types::MeridianError::Database(e.to_string()))?;

    Ok(pool)
}
