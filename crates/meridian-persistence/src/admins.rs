//! Repository for the `admins` table: operator login credentials.

use std::sync::Arc;

use sqlx::PgPool;
use tracing::instrument;

use meridian_types::{AdminUser, MeridianError, Result};

/// Typed access to the `admins` table.
#[derive(Clone)]
pub struct AdminRepository {
    pool: Arc<PgPool>,
}

impl AdminRepository {
    /// Build a repository over a shared connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// Is the admins table empty? The original crawler allows the first
    /// admin account to be created without an existing token; once an
    /// admin exists, creating another requires a valid token.
    #[instrument(skip(self))]
    pub async fn is_empty(&self) -> Result<bool> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM admins")
            .fetch_one(self.pool.as_ref())
            .await
            .map_err(|e| MeridianError::Database(e.to_string()))?;
        Ok(count.0 == 0)
    }

    /// Fetch an admin by username.
    #[instrument(skip(self))]
    pub async fn find_by_username(&self, username: &str) -> Result<Option<AdminUser>> {
        let row = sqlx::query_as::<_, (String, String)>(
            "SELECT username, password_hash FROM admins WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(|e| MeridianError::Database(e.to_string()))?;
        Ok(row.map(|(username, password_hash)| AdminUser::new(username, password_hash)))
    }

    /// Insert a new admin account.
    #[instrument(skip(self, password_hash))]
    pub async fn create(&self, username: &str, password_hash: &str) -> Result<()> {
        sqlx::query("INSERT INTO admins (username, password_hash) VALUES ($1, $2)")
            .bind(username)
            .bind(password_hash)
            .execute(self.pool.as_ref())
            .await
            .map_err(|e| MeridianError::Database(e.to_string()))?;
        Ok(())
    }
}
