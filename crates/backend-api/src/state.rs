use std::sync::Arc;

use axum::http::HeaderMap;
use astroconsult_auth::{AuthError, Authenticator, Caller};
use astroconsult_chats::{ChatService, ChatStore, MessageService, SqliteChatStore};
use astroconsult_config::AppConfig;
use sqlx::SqlitePool;

use crate::util::bearer_token;
use crate::ApiError;

#[derive(Clone)]
pub struct AppState {
    authenticator: Authenticator,
    chats: ChatService,
    messages: MessageService,
}

impl AppState {
    /// Wire the services onto one shared pool
    pub fn new(pool: SqlitePool, config: &AppConfig) -> Self {
        let authenticator = Authenticator::new(pool.clone(), config.auth.clone());
        let store: Arc<dyn ChatStore> = Arc::new(SqliteChatStore::new(pool));
        Self::with_store(authenticator, store, config)
    }

    pub fn with_store(
        authenticator: Authenticator,
        store: Arc<dyn ChatStore>,
        config: &AppConfig,
    ) -> Self {
        Self {
            authenticator,
            chats: ChatService::new(store.clone()),
            messages: MessageService::new(store, config.chat.clone()),
        }
    }

    pub fn authenticator(&self) -> &Authenticator {
        &self.authenticator
    }

    pub fn chats(&self) -> &ChatService {
        &self.chats
    }

    pub fn messages(&self) -> &MessageService {
        &self.messages
    }

    /// Resolve the bearer token on a request, if any, into the caller identity
    pub async fn resolve_caller(&self, headers: &HeaderMap) -> Result<Option<Caller>, AuthError> {
        self.authenticator.resolve_caller(bearer_token(headers)).await
    }

    /// Like [`AppState::resolve_caller`], but a missing session is a 401
    pub async fn require_caller(&self, headers: &HeaderMap) -> Result<Caller, ApiError> {
        self.resolve_caller(headers)
            .await?
            .ok_or_else(ApiError::unauthorized)
    }
}
