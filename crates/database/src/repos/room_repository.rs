//! Repository for chat room data access operations.

use crate::entities::ChatRoomRecord;
use crate::types::{errors::DatabaseError, DatabaseResult};
use sqlx::SqlitePool;
use tracing::info;

const ROOM_COLUMNS: &str = "id, public_id, user_id, astrologer_id, created_at";

/// Repository for chat room database operations
#[derive(Clone)]
pub struct RoomRepository {
    pool: SqlitePool,
}

impl RoomRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Find a room by its public id, but only if `participant` is one of its two members.
    ///
    /// A missing room and a room the participant does not belong to are
    /// indistinguishable to the caller.
    pub async fn find_for_participant(
        &self,
        public_id: &str,
        participant: &str,
    ) -> DatabaseResult<Option<ChatRoomRecord>> {
        let room = sqlx::query_as::<_, ChatRoomRecord>(&format!(
            "SELECT {ROOM_COLUMNS} FROM chat_rooms
             WHERE public_id = ? AND (user_id = ? OR astrologer_id = ?)"
        ))
        .bind(public_id)
        .bind(participant)
        .bind(participant)
        .fetch_optional(&self.pool)
        .await?;

        Ok(room)
    }

    /// The room for a user/astrologer pair, if one has been opened
    pub async fn find_by_pair(
        &self,
        user_id: &str,
        astrologer_id: &str,
    ) -> DatabaseResult<Option<ChatRoomRecord>> {
        let room = sqlx::query_as::<_, ChatRoomRecord>(&format!(
            "SELECT {ROOM_COLUMNS} FROM chat_rooms WHERE user_id = ? AND astrologer_id = ?"
        ))
        .bind(user_id)
        .bind(astrologer_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(room)
    }

    /// Create the room for a user/astrologer pair, or return the existing one.
    ///
    /// The boolean is `true` when a new row was inserted.
    pub async fn open(
        &self,
        user_id: &str,
        astrologer_id: &str,
    ) -> DatabaseResult<(ChatRoomRecord, bool)> {
        let public_id = cuid2::cuid();
        let now = chrono::Utc::now().to_rfc3339();

        let result = sqlx::query(
            "INSERT INTO chat_rooms (public_id, user_id, astrologer_id, created_at)
             VALUES (?, ?, ?, ?)
             ON CONFLICT (user_id, astrologer_id) DO NOTHING",
        )
        .bind(&public_id)
        .bind(user_id)
        .bind(astrologer_id)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        let created = result.rows_affected() == 1;

        let room = self
            .find_by_pair(user_id, astrologer_id)
            .await?
            .ok_or(DatabaseError::Query(sqlx::Error::RowNotFound))?;

        if created {
            info!(room = %room.public_id, user_id, astrologer_id, "opened chat room");
        }

        Ok((room, created))
    }

    /// All rooms the identity participates in, newest first
    pub async fn list_for_participant(
        &self,
        participant: &str,
    ) -> DatabaseResult<Vec<ChatRoomRecord>> {
        let rooms = sqlx::query_as::<_, ChatRoomRecord>(&format!(
            "SELECT {ROOM_COLUMNS} FROM chat_rooms
             WHERE user_id = ? OR astrologer_id = ?
             ORDER BY created_at DESC, id DESC"
        ))
        .bind(participant)
        .bind(participant)
        .fetch_all(&self.pool)
        .await?;

        Ok(rooms)
    }
}
