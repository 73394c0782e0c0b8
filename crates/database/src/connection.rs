//! Database connection management

use anyhow::{Context, Result};
use astroconsult_config::DatabaseConfig;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use tokio::fs;
use tracing::info;

const BUSY_TIMEOUT: Duration = Duration::from_millis(5_000);

/// Prepare and establish a database connection pool.
///
/// Pragmas are applied through the connect options so every pooled
/// connection gets them, not only the first one.
pub async fn prepare_database(config: &DatabaseConfig) -> Result<SqlitePool> {
    ensure_sqlite_directory(&config.url).await?;

    let options = SqliteConnectOptions::from_str(&config.url)
        .with_context(|| format!("invalid sqlite url {}", config.url))?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(BUSY_TIMEOUT);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections.max(1))
        .connect_with(options)
        .await
        .with_context(|| format!("failed to connect to database {}", config.url))?;

    info!(url = %config.url, "database connection established");
    Ok(pool)
}

/// Ensure the parent directory of a file-backed SQLite database exists
async fn ensure_sqlite_directory(url: &str) -> Result<()> {
    let Some(sqlite_path) = url
        .strip_prefix("sqlite://")
        .or_else(|| url.strip_prefix("sqlite:"))
    else {
        return Ok(());
    };

    if sqlite_path.starts_with(":memory:") {
        return Ok(());
    }

    let path = Path::new(sqlite_path.split('?').next().unwrap_or(sqlite_path));
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await.with_context(|| {
                format!("failed to create sqlite directory {}", parent.display())
            })?;
        }
    }

    Ok(())
}
