//! Repository for the `potential_urls` table: links discovered but not
//! (yet) crawled, because they were filtered out of the active whitelist.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use meridian_types::{MeridianError, PotentialUrl, Result};

/// Typed access to the `potential_urls` table.
#[derive(Clone)]
pub struct PotentialUrlRepository {
    pool: Arc<PgPool>,
}

impl PotentialUrlRepository {
    /// Build a repository over a shared connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// List every known potential URL.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<PotentialUrl>> {
        let rows = sqlx::query_as::<_, PotentialUrlRow>(
            "SELECT id, url, first_seen, times_seen FROM potential_urls",
        )
        .fetch_all(self.pool.as_ref())
        .await
        .map_err(|e| MeridianError::Database(e.to_string()))?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Record an observation of `url`: insert a fresh row on first sight,
    /// or bump `times_seen` if it was already recorded.
    #[instrument(skip(self))]
    pub async fn observe(&self, url: &str, now: DateTime<Utc>) -> Result<()> {
        sqlx::query(
            "INSERT INTO potential_urls (url, first_seen, times_seen)
             VALUES ($1, $2, 1)
             ON CONFLICT (url) DO UPDATE
             SET times_seen = potential_urls.times_seen + 1",
        )
        .bind(url)
        .bind(now)
        .execute(self.pool.as_ref())
        .await
        .map_err(|e| MeridianError::Database(e.to_string()))?;
        Ok(())
    }
}

#[derive(sqlx::FromRow)]
struct PotentialUrlRow {
    id: i64,
    url: String,
    first_seen: DateTime<Utc>,
    times_seen: i32,
}

impl From<PotentialUrlRow> for PotentialUrl {
    fn from(row: PotentialUrlRow) -> Self {
        PotentialUrl {
            id: Some(row.id),
            url: row.url,
            first_seen: row.first_seen,
            times_seen: row.times_seen,
        }
    }
}
