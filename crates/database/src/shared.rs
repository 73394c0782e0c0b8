//! Process-wide shared connection pool.
//!
//! The pool is created on first use and then handed out as cheap clones to
//! every caller. It is never closed explicitly; the process exit tears it down.

use astroconsult_config::DatabaseConfig;
use sqlx::SqlitePool;
use tokio::sync::OnceCell;
use tracing::info;

use crate::types::DatabaseResult;

static SHARED_POOL: OnceCell<SqlitePool> = OnceCell::const_new();

/// Return a handle to the shared pool, initialising it from `config` on the
/// first call.
///
/// Later calls ignore `config` and return the already initialised pool. A
/// failed initialisation leaves the cell empty so the next call retries.
pub async fn shared_pool(config: &DatabaseConfig) -> DatabaseResult<SqlitePool> {
    let pool = SHARED_POOL
        .get_or_try_init(|| async {
            info!(url = %config.url, "initialising shared database pool");
            crate::initialize_database(config).await
        })
        .await?;

    Ok(pool.clone())
}
