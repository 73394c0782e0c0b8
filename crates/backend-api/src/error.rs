use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use astroconsult_auth::AuthError;
use astroconsult_chats::ChatError;
use serde::Serialize;
use tracing::{error, warn};
use utoipa::ToSchema;

pub const UNAUTHORIZED_MESSAGE: &str = "Unauthorized";
pub const FORBIDDEN_CHAT_MESSAGE: &str = "Chat not found or unauthorized";
pub const INTERNAL_MESSAGE: &str = "Internal server error";

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, UNAUTHORIZED_MESSAGE)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            error: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(error: anyhow::Error) -> Self {
        error!(error = ?error, "internal error");
        Self::internal_server_error(INTERNAL_MESSAGE)
    }
}

impl From<AuthError> for ApiError {
    fn from(error: AuthError) -> Self {
        match error {
            AuthError::InvalidCredentials
            | AuthError::SessionNotFound
            | AuthError::SessionExpired
            | AuthError::InvalidSession => {
                warn!(error = %error, "authentication rejected");
                Self::new(StatusCode::UNAUTHORIZED, error.to_string())
            }
            AuthError::UserExists => Self::conflict(error.to_string()),
            AuthError::InvalidInput(message) => Self::bad_request(message),
            AuthError::Database(_) | AuthError::PasswordHash(_) => {
                error!(error = ?error, "auth error");
                Self::internal_server_error(INTERNAL_MESSAGE)
            }
        }
    }
}

impl From<ChatError> for ApiError {
    fn from(error: ChatError) -> Self {
        match error {
            ChatError::Unauthorized => Self::unauthorized(),
            ChatError::Forbidden => Self::forbidden(FORBIDDEN_CHAT_MESSAGE),
            ChatError::Validation(message) | ChatError::InvalidParticipant(message) => {
                Self::bad_request(message)
            }
            ChatError::Store(source) => {
                error!(error = ?source, "chat store error");
                Self::internal_server_error(INTERNAL_MESSAGE)
            }
        }
    }
}
