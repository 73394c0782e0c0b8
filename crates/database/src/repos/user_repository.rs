//! Read-only lookups against the account table.
//!
//! Accounts are written by the auth crate; the chat side only needs to know
//! whether an identity exists and which role it holds.

use crate::types::DatabaseResult;
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Stored role of the account with this public id
    pub async fn role_of(&self, public_id: &str) -> DatabaseResult<Option<String>> {
        let role = sqlx::query_scalar::<_, String>("SELECT role FROM users WHERE public_id = ?")
            .bind(public_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(role)
    }
}
