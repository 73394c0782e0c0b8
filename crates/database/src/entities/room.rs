use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A consultation room between one user and one astrologer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct ChatRoomRecord {
    /// Database primary key
    pub id: i64,
    /// Identifier exposed to clients as `roomId`
    pub public_id: String,
    /// Identity of the consulting user
    pub user_id: String,
    /// Identity of the consulted astrologer
    pub astrologer_id: String,
    /// RFC 3339 creation time
    pub created_at: String,
}

impl ChatRoomRecord {
    /// The participant on the other side of `identity`, if `identity` belongs to the room
    pub fn counterpart_of(&self, identity: &str) -> Option<&str> {
        if self.user_id == identity {
            Some(&self.astrologer_id)
        } else if self.astrologer_id == identity {
            Some(&self.user_id)
        } else {
            None
        }
    }
}
