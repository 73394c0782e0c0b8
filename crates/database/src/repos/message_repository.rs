//! Repository for message data access operations.

use crate::entities::MessageRecord;
use crate::types::DatabaseResult;
use sqlx::SqlitePool;
use tracing::debug;

const MESSAGE_COLUMNS: &str =
    "id, public_id, room_id, sender, receiver, content, timestamp, is_read";

/// Fields needed to persist a new message
#[derive(Debug, Clone)]
pub struct NewMessage {
    pub room_id: i64,
    pub sender: String,
    pub receiver: String,
    pub content: String,
    /// Milliseconds since the Unix epoch
    pub timestamp: i64,
}

/// Repository for message database operations
#[derive(Clone)]
pub struct MessageRepository {
    pool: SqlitePool,
}

impl MessageRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Messages exchanged between two identities in a room, in either direction,
    /// oldest first. Equal timestamps keep insertion order.
    pub async fn find_between(
        &self,
        room_id: i64,
        first: &str,
        second: &str,
    ) -> DatabaseResult<Vec<MessageRecord>> {
        let messages = sqlx::query_as::<_, MessageRecord>(&format!(
            "SELECT {MESSAGE_COLUMNS} FROM messages
             WHERE room_id = ?
               AND ((sender = ? AND receiver = ?) OR (sender = ? AND receiver = ?))
             ORDER BY timestamp ASC, id ASC"
        ))
        .bind(room_id)
        .bind(first)
        .bind(second)
        .bind(second)
        .bind(first)
        .fetch_all(&self.pool)
        .await?;

        Ok(messages)
    }

    /// Mark every unread message addressed to `receiver` in the room as read.
    ///
    /// Returns the number of rows that flipped.
    pub async fn mark_read_for_receiver(
        &self,
        room_id: i64,
        receiver: &str,
    ) -> DatabaseResult<u64> {
        let result = sqlx::query(
            "UPDATE messages SET is_read = 1
             WHERE room_id = ? AND receiver = ? AND is_read = 0",
        )
        .bind(room_id)
        .bind(receiver)
        .execute(&self.pool)
        .await?;

        debug!(room_id, receiver, updated = result.rows_affected(), "marked messages read");
        Ok(result.rows_affected())
    }

    pub async fn create(&self, message: &NewMessage) -> DatabaseResult<MessageRecord> {
        let public_id = cuid2::cuid();

        let id = sqlx::query(
            "INSERT INTO messages (public_id, room_id, sender, receiver, content, timestamp, is_read)
             VALUES (?, ?, ?, ?, ?, ?, 0)",
        )
        .bind(&public_id)
        .bind(message.room_id)
        .bind(&message.sender)
        .bind(&message.receiver)
        .bind(&message.content)
        .bind(message.timestamp)
        .execute(&self.pool)
        .await?
        .last_insert_rowid();

        Ok(MessageRecord {
            id,
            public_id,
            room_id: message.room_id,
            sender: message.sender.clone(),
            receiver: message.receiver.clone(),
            content: message.content.clone(),
            timestamp: message.timestamp,
            is_read: false,
        })
    }

    /// Unread messages addressed to `receiver` across all rooms
    pub async fn count_unread_for_receiver(&self, receiver: &str) -> DatabaseResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM messages WHERE receiver = ? AND is_read = 0",
        )
        .bind(receiver)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }
}
