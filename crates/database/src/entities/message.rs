use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A stored chat message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct MessageRecord {
    pub id: i64,
    pub public_id: String,
    /// Primary key of the owning room
    pub room_id: i64,
    pub sender: String,
    pub receiver: String,
    pub content: String,
    /// Milliseconds since the Unix epoch
    pub timestamp: i64,
    pub is_read: bool,
}
