//! Error types for the database layer

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Database connection error: {0}")]
    Connection(String),

    #[error("Database migration error: {0}")]
    Migration(String),

    #[error("Database query error: {0}")]
    Query(#[from] sqlx::Error),
}
