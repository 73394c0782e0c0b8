//! Error types for the chat services.

use astroconsult_database::DatabaseError;
use thiserror::Error;

/// Result type alias for chat operations
pub type ChatResult<T> = Result<T, ChatError>;

#[derive(Debug, Error)]
pub enum ChatError {
    /// No authenticated caller accompanied the request
    #[error("unauthorized")]
    Unauthorized,

    /// The room does not exist or the caller is not one of its participants
    #[error("chat not found or unauthorized")]
    Forbidden,

    #[error("validation error: {0}")]
    Validation(String),

    #[error("invalid participant: {0}")]
    InvalidParticipant(String),

    #[error("store error: {0}")]
    Store(#[from] DatabaseError),
}

impl ChatError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn invalid_participant(message: impl Into<String>) -> Self {
        Self::InvalidParticipant(message.into())
    }
}
