use astroconsult_database::ChatRoomRecord;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A consultation room between one user and one astrologer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChatRoom {
    pub id: String,
    pub user_id: String,
    pub astrologer_id: String,
    pub created_at: String,
}

impl From<ChatRoomRecord> for ChatRoom {
    fn from(record: ChatRoomRecord) -> Self {
        Self {
            id: record.public_id,
            user_id: record.user_id,
            astrologer_id: record.astrologer_id,
            created_at: record.created_at,
        }
    }
}
