//! AstroConsult Database Crate
//!
//! This crate provides database functionality for the AstroConsult backend,
//! including connection management, migrations, the process-wide shared pool,
//! and repository implementations for chat rooms and messages.

use astroconsult_config::DatabaseConfig;
use sqlx::SqlitePool;

pub mod connection;
pub mod entities;
pub mod migrations;
pub mod repos;
pub mod shared;
pub mod types;

pub use connection::prepare_database;
pub use migrations::{run_migrations, MIGRATOR};
pub use shared::shared_pool;

pub use repos::{MessageRepository, NewMessage, RoomRepository, UserRepository};

pub use entities::{message::MessageRecord, room::ChatRoomRecord};

pub use types::{errors::DatabaseError, DatabaseResult};

/// Initialize the database with migrations
pub async fn initialize_database(config: &DatabaseConfig) -> DatabaseResult<SqlitePool> {
    let pool = prepare_database(config)
        .await
        .map_err(|e| DatabaseError::Connection(format!("{e:#}")))?;

    run_migrations(&pool)
        .await
        .map_err(|e| DatabaseError::Migration(format!("{e:#}")))?;

    Ok(pool)
}
