use anyhow::{Context, Result};
use astroconsult_auth::Authenticator;
use astroconsult_config::AppConfig;
use astroconsult_database::shared_pool;
use sqlx::SqlitePool;
use tracing::info;

pub mod telemetry {
    use anyhow::Result;
    use tracing_subscriber::{fmt::SubscriberBuilder, EnvFilter};

    /// Install the global fmt subscriber; `RUST_LOG` overrides the `info` default.
    pub fn init_tracing() -> Result<()> {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        let subscriber = SubscriberBuilder::default()
            .with_env_filter(env_filter)
            .with_target(true)
            .finish();

        tracing::subscriber::set_global_default(subscriber)
            .map_err(|error| anyhow::anyhow!("failed to set tracing subscriber: {error}"))
    }
}

#[derive(Clone)]
pub struct BackendServices {
    pub db_pool: SqlitePool,
    pub authenticator: Authenticator,
}

impl BackendServices {
    /// Bring up the process-wide pool (migrated) and the session provider.
    ///
    /// The pool is shared for the lifetime of the process: a second call
    /// hands back the same pool even when given a different configuration.
    pub async fn initialise(config: &AppConfig) -> Result<Self> {
        let db_pool = shared_pool(&config.database)
            .await
            .context("failed to initialise database")?;

        let authenticator = Authenticator::new(db_pool.clone(), config.auth.clone());

        info!(
            max_connections = config.database.max_connections,
            "backend services ready"
        );

        Ok(Self {
            db_pool,
            authenticator,
        })
    }
}

pub async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::warn!(?error, "failed to listen for shutdown signal");
    }
    info!("shutdown signal received");
}
