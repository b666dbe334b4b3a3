//! Repository for the `resources` table: URLs that have been crawled.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use meridian_types::{CrawledResource, MeridianError, Result};

/// Typed access to the `resources` table.
#[derive(Clone)]
pub struct ResourceRepository {
    pool: Arc<PgPool>,
}

impl ResourceRepository {
    /// Build a repository over a shared connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// Fetch every crawled resource's url and last-visited timestamp, used
    /// by the Orchestrator to split the seeded frontier into fresh vs.
    /// already-visited URLs.
    #[instrument(skip(self))]
    pub async fn list_urls(&self) -> Result<Vec<(String, DateTime<Utc>)>> {
        let rows = sqlx::query_as::<_, (String, DateTime<Utc>)>(
            "SELECT url, last_visited FROM resources",
        )
        .fetch_all(self.pool.as_ref())
        .await
        .map_err(|e| MeridianError::Database(e.to_string()))?;
        Ok(rows)
    }

    /// Look up a single resource by its canonical URL.
    #[instrument(skip(self))]
    pub async fn find_by_url(&self, url: &str) -> Result<Option<CrawledResource>> {
        let row = sqlx::query_as::<_, ResourceRow>(
            "SELECT id, url, first_visited, last_visited, all_visits, external_links
             FROM resources WHERE url = $1",
        )
        .bind(url)
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(|e| MeridianError::Database(e.to_string()))?;
        Ok(row.map(Into::into))
    }

    /// Insert a new crawl record, or, if the URL was already crawled
    /// before, bump its visit counter and refresh `last_visited` /
    /// `external_links`.
    ///
    /// This replaces the original crawler's `log_resource`, which only ever
    /// inserted and so raised a unique-constraint violation on every
    /// revisit; upserting here is a deliberate behavior fix, not a
    /// reinterpretation of intent.
    #[instrument(skip(self, external_links))]
    pub async fn upsert(&self, url: &str, now: DateTime<Utc>, external_links: &[String]) -> Result<()> {
        sqlx::query(
            "INSERT INTO resources (url, first_visited, last_visited, all_visits, external_links)
             VALUES ($1, $2, $2, 1, $3)
             ON CONFLICT (url) DO UPDATE
             SET last_visited = EXCLUDED.last_visited,
                 all_visits = resources.all_visits + 1,
                 external_links = EXCLUDED.external_links",
        )
        .bind(url)
        .bind(now)
        .bind(external_links)
        .execute(self.pool.as_ref())
        .await
        .map_err(|e| MeridianError::Database(e.to_string()))?;
        Ok(())
    }
}

#[derive(sqlx::FromRow)]
struct ResourceRow {
    id: i64,
    url: String,
    first_visited: DateTime<Utc>,
    last_visited: DateTime<Utc>,
    all_visits: i32,
    external_links: Vec<String>,
}

impl From<ResourceRow> for CrawledResource {
    fn from(row: ResourceRow) -> Self {
        CrawledResource {
            id: Some(row.id),
            url: row.url,
            first_visited: row.first_visited,
            last_visited: row.last_visited,
            all_visits: row.all_visits,
            external_links: row.external_links,
        }
    }
}
