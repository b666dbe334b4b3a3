//! Repository for the `seed_urls` table: operator-curated crawl roots.

use std::sync::Arc;

use sqlx::PgPool;
use tracing::instrument;

use meridian_types::{MeridianError, Result, SeedSite};

/// Typed access to the `seed_urls` table.
#[derive(Clone)]
pub struct SeedSiteRepository {
    pool: Arc<PgPool>,
}

impl SeedSiteRepository {
    /// Build a repository over a shared connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// List every configured seed site.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<SeedSite>> {
        let rows = sqlx::query_as::<_, SeedRow>("SELECT id, url, seeds FROM seed_urls")
            .fetch_all(self.pool.as_ref())
            .await
            .map_err(|e| MeridianError::Database(e.to_string()))?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Register a new seed site.
    #[instrument(skip(self, seeds))]
    pub async fn add(&self, url: &str, seeds: &[String]) -> Result<()> {
        sqlx::query("INSERT INTO seed_urls (url, seeds) VALUES ($1, $2)")
            .bind(url)
            .bind(seeds)
            .execute(self.pool.as_ref())
            .await
            .map_err(|e| MeridianError::Database(e.to_string()))?;
        Ok(())
    }

    /// Remove a seed site entirely.
    #[instrument(skip(self))]
    pub async fn delete(&self, url: &str) -> Result<()> {
        sqlx::query("DELETE FROM seed_urls WHERE url = $1")
            .bind(url)
            .execute(self.pool.as_ref())
            .await
            .map_err(|e| MeridianError::Database(e.to_string()))?;
        Ok(())
    }

    /// Replace a seed site's url, keeping its seed suffixes.
    #[instrument(skip(self))]
    pub async fn rename(&self, old_url: &str, new_url: &str) -> Result<()> {
        sqlx::query("UPDATE seed_urls SET url = $1 WHERE url = $2")
            .bind(new_url)
            .bind(old_url)
            .execute(self.pool.as_ref())
            .await
            .map_err(|e| MeridianError::Database(e.to_string()))?;
        Ok(())
    }

    /// Append a seed suffix to an existing seed site.
    #[instrument(skip(self))]
    pub async fn add_seed(&self, url: &str, seed: &str) -> Result<()> {
        sqlx::query("UPDATE seed_urls SET seeds = array_append(seeds, $1) WHERE url = $2")
            .bind(seed)
            .bind(url)
            .execute(self.pool.as_ref())
            .await
            .map_err(|e| MeridianError::Database(e.to_string()))?;
        Ok(())
    }

    /// Remove a seed suffix from an existing seed site.
    #[instrument(skip(self))]
    pub async fn remove_seed(&self, url: &str, seed: &str) -> Result<()> {
        sqlx::query("UPDATE seed_urls SET seeds = array_remove(seeds, $1) WHERE url = $2")
            .bind(seed)
            .bind(url)
            .execute(self.pool.as_ref())
            .await
            .map_err(|e| MeridianError::Database(e.to_string()))?;
        Ok(())
    }

    /// Rename one of a seed site's existing seed suffixes.
    #[instrument(skip(self))]
    pub async fn rename_seed(&self, url: &str, old_seed: &str, new_seed: &str) -> Result<()> {
        sqlx::query(
            "UPDATE seed_urls
             SET seeds = array_replace(seeds, $1, $2)
             WHERE url = $3",
        )
        .bind(old_seed)
        .bind(new_seed)
        .bind(url)
        .execute(self.pool.as_ref())
        .await
        .map_err(|e| MeridianError::Database(e.to_string()))?;
        Ok(())
    }
}

#[derive(sqlx::FromRow)]
struct SeedRow {
    id: i64,
    url: String,
    seeds: Vec<String>,
}

impl From<SeedRow> for SeedSite {
    fn from(row: SeedRow) -> Self {
        SeedSite {
            id: Some(row.id),
            url: row.url,
            seeds: row.seeds,
        }
    }
}
