//! Environment-variable configuration loading.
//!
//! Grounded on `riptide-config::env::EnvConfigLoader`'s approach (typed
//! getters, a `require`/`default` split, a dedicated error type) but
//! inlined here rather than pulled in as a shared crate, since this is the
//! only place Meridian reads environment configuration from.

use thiserror::Error;

/// Failure while assembling [`AppConfig`] from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable was not set.
    #[error("missing required environment variable: {0}")]
    MissingEnv(String),
    /// An environment variable was set but couldn't be parsed.
    #[error("invalid value for {key}: {value}")]
    InvalidValue {
        /// The variable name.
        key: String,
        /// The value that failed to parse.
        value: String,
    },
}

/// Runtime configuration for the admin API and the crawl pipeline it
/// controls, assembled once at startup from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Address the admin HTTP server binds to.
    pub bind_addr: String,
    /// HMAC signing key for issued JWTs.
    pub secret_key: String,
    /// JWT signing algorithm name, e.g. `HS256`.
    pub algorithm: String,
    /// How long issued access tokens remain valid.
    pub token_lifetime_minutes: i64,
    /// Postgres connection string.
    pub database_url: String,
    /// Qdrant gRPC endpoint, e.g. `http://localhost:6334`.
    pub qdrant_url: String,
    /// When true, the auth middleware admits every request without a
    /// token. Intended for local development only.
    pub dev_mode: bool,
}

impl AppConfig {
    /// Load configuration from the process environment.
    ///
    /// Required: `SECRET_KEY`, `POSTGRES_USER`, `POSTGRES_PASSWORD`,
    /// `POSTGRES_HOST`, `POSTGRES_DB`.
    /// Optional, with defaults: `ALGORITHM` (`HS256`), `POSTGRES_PORT`
    /// (`5432`), `QDRANT_URL` (`http://localhost:6334`), `BIND_ADDR`
    /// (`0.0.0.0:8080`), `TOKEN_LIFETIME_MINUTES` (`30`), `DEV` (`false`).
    pub fn from_env() -> Result<Self, ConfigError> {
        let secret_key = require("SECRET_KEY")?;
        let algorithm = optional("ALGORITHM", "HS256");
        let bind_addr = optional("BIND_ADDR", "0.0.0.0:8080");
        let qdrant_url = optional("QDRANT_URL", "http://localhost:6334");
        let dev_mode = parse_bool(&optional("DEV", "false"), "DEV")?;
        let token_lifetime_minutes = parse_i64(&optional("TOKEN_LIFETIME_MINUTES", "30"), "TOKEN_LIFETIME_MINUTES")?;

        let pg_user = require("POSTGRES_USER")?;
        let pg_password = require("POSTGRES_PASSWORD")?;
        let pg_host = require("POSTGRES_HOST")?;
        let pg_port = optional("POSTGRES_PORT", "5432");
        let pg_db = require("POSTGRES_DB")?;
        let database_url = format!("postgres://{pg_user}:{pg_password}@{pg_host}:{pg_port}/{pg_db}");

        Ok(Self {
            bind_addr,
            secret_key,
            algorithm,
            token_lifetime_minutes,
            database_url,
            qdrant_url,
            dev_mode,
        })
    }
}

fn require(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnv(key.to_string()))
}

fn optional(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_bool(value: &str, key: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}

fn parse_i64(value: &str, key: &str) -> Result<i64, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    })
}
