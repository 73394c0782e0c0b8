//! Storage seam for the chat services.
//!
//! Services talk to a [`ChatStore`] so they can be exercised against a mock
//! in unit tests and against SQLite everywhere else.

pub mod sqlite_store;

pub use sqlite_store::SqliteChatStore;

use async_trait::async_trait;
use astroconsult_database::{ChatRoomRecord, DatabaseResult, MessageRecord, NewMessage};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatStore: Send + Sync {
    /// Room with this public id, only if `participant` is one of its members
    async fn find_room_for_participant(
        &self,
        room_id: &str,
        participant: &str,
    ) -> DatabaseResult<Option<ChatRoomRecord>>;

    /// Messages in the room exchanged between `first` and `second`, oldest first
    async fn messages_between(
        &self,
        room: i64,
        first: &str,
        second: &str,
    ) -> DatabaseResult<Vec<MessageRecord>>;

    /// Flag every unread message addressed to `receiver` in the room as read
    async fn mark_read_for_receiver(&self, room: i64, receiver: &str) -> DatabaseResult<u64>;

    /// Stored role name of an account, if the account exists
    async fn participant_role(&self, participant: &str) -> DatabaseResult<Option<String>>;

    async fn open_room(
        &self,
        user_id: &str,
        astrologer_id: &str,
    ) -> DatabaseResult<(ChatRoomRecord, bool)>;

    async fn rooms_for(&self, participant: &str) -> DatabaseResult<Vec<ChatRoomRecord>>;

    async fn create_message(&self, message: &NewMessage) -> DatabaseResult<MessageRecord>;

    async fn unread_count(&self, receiver: &str) -> DatabaseResult<i64>;
}
