//! Database connection pool bootstrap.

use crate::config::DatabaseConfig;
use anyhow::{Context, Result};
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use tracing::info;

/// Build the PostgreSQL pool for the configured database.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .connect(&config.url)
        .await
        .context("Failed to connect to PostgreSQL")?;

    info!(
        "Connected to PostgreSQL (max_connections = {})",
        config.max_connections
    );
    Ok(pool)
}
