use astroconsult_database::MessageRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;
use utoipa::ToSchema;

/// A single consultation message as seen by a participant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub room_id: String,
    pub sender: String,
    pub receiver: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    /// Read flag as stored at the moment the message was fetched
    pub is_read: bool,
}

impl Message {
    /// Build the client view of a stored row.
    ///
    /// Rows only know their room's primary key, so the caller supplies the
    /// public room id. A stored timestamp outside chrono's range is logged and
    /// reported as the Unix epoch.
    pub fn from_record(record: MessageRecord, room_public_id: &str) -> Self {
        let timestamp = DateTime::<Utc>::from_timestamp_millis(record.timestamp)
            .unwrap_or_else(|| {
                warn!(
                    message = %record.public_id,
                    timestamp = record.timestamp,
                    "stored message timestamp out of range"
                );
                DateTime::<Utc>::default()
            });

        Self {
            id: record.public_id,
            room_id: room_public_id.to_owned(),
            sender: record.sender,
            receiver: record.receiver,
            content: record.content,
            timestamp,
            is_read: record.is_read,
        }
    }
}
