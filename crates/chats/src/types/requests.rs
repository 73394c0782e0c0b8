//! Request payloads accepted by the chat services.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Which conversation to load: the room plus the two participants whose
/// exchange should be returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRequest {
    pub user_id: String,
    pub astrologer_id: String,
    pub room_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OpenRoomRequest {
    pub astrologer_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    pub room_id: String,
    pub content: String,
}
