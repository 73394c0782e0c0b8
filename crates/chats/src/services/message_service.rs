//! Message history, sending, and unread accounting.

use std::sync::Arc;

use astroconsult_auth::Caller;
use astroconsult_config::ChatConfig;
use astroconsult_database::NewMessage;
use chrono::Utc;
use tracing::{debug, info, warn};

use crate::entities::Message;
use crate::repositories::ChatStore;
use crate::types::{ChatError, ChatResult, HistoryRequest, SendMessageRequest};
use crate::utils::validate_message_content;

#[derive(Clone)]
pub struct MessageService {
    store: Arc<dyn ChatStore>,
    limits: ChatConfig,
}

impl MessageService {
    pub fn new(store: Arc<dyn ChatStore>, limits: ChatConfig) -> Self {
        Self { store, limits }
    }

    /// Load the conversation between `user_id` and `astrologer_id` in a room
    /// and mark everything addressed to the caller in that room as read.
    ///
    /// The caller must be a participant of the room; a missing room and a
    /// foreign room both yield [`ChatError::Forbidden`]. The returned messages
    /// carry their read flags from before the update. The read and the update
    /// are separate statements, so a message arriving in between may be
    /// flagged read without having been returned.
    pub async fn get_messages(
        &self,
        caller: Option<&Caller>,
        request: &HistoryRequest,
    ) -> ChatResult<Vec<Message>> {
        let Some(caller) = caller else {
            warn!(room = %request.room_id, "chat history requested without a session");
            return Err(ChatError::Unauthorized);
        };

        let Some(room) = self
            .store
            .find_room_for_participant(&request.room_id, &caller.id)
            .await?
        else {
            warn!(room = %request.room_id, caller = %caller.id, "chat history denied");
            return Err(ChatError::Forbidden);
        };

        let records = self
            .store
            .messages_between(room.id, &request.user_id, &request.astrologer_id)
            .await?;

        if !records.is_empty() {
            let updated = self.store.mark_read_for_receiver(room.id, &caller.id).await?;
            debug!(room = %room.public_id, caller = %caller.id, updated, "marked room messages read");
        }

        debug!(room = %room.public_id, count = records.len(), "loaded chat history");

        Ok(records
            .into_iter()
            .map(|record| Message::from_record(record, &room.public_id))
            .collect())
    }

    /// Post a message from the caller to the other participant of the room.
    pub async fn send_message(
        &self,
        caller: &Caller,
        request: &SendMessageRequest,
    ) -> ChatResult<Message> {
        validate_message_content(&request.content, self.limits.max_message_length)?;

        let Some(room) = self
            .store
            .find_room_for_participant(&request.room_id, &caller.id)
            .await?
        else {
            warn!(room = %request.room_id, caller = %caller.id, "message send denied");
            return Err(ChatError::Forbidden);
        };

        let receiver = room
            .counterpart_of(&caller.id)
            .ok_or(ChatError::Forbidden)?
            .to_owned();

        let record = self
            .store
            .create_message(&NewMessage {
                room_id: room.id,
                sender: caller.id.clone(),
                receiver,
                content: request.content.clone(),
                timestamp: Utc::now().timestamp_millis(),
            })
            .await?;

        info!(room = %room.public_id, sender = %caller.id, message = %record.public_id, "message sent");
        Ok(Message::from_record(record, &room.public_id))
    }

    /// Unread messages addressed to the caller across all rooms
    pub async fn unread_count(&self, caller: &Caller) -> ChatResult<i64> {
        Ok(self.store.unread_count(&caller.id).await?)
    }
}
