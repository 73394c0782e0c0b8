//! Database migrations

use anyhow::Context;
use sqlx::SqlitePool;
use tracing::info;

/// Embedded migrations from the workspace `migrations/` directory
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations");

/// Run database migrations
pub async fn run_migrations(pool: &SqlitePool) -> anyhow::Result<()> {
    MIGRATOR
        .run(pool)
        .await
        .context("database migrations failed")?;
    info!("database migrations applied");
    Ok(())
}
