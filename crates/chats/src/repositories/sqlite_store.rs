use async_trait::async_trait;
use astroconsult_database::{
    ChatRoomRecord, DatabaseResult, MessageRecord, MessageRepository, NewMessage, RoomRepository,
    UserRepository,
};
use sqlx::SqlitePool;

use super::ChatStore;

/// [`ChatStore`] backed by the SQLite repositories
#[derive(Clone)]
pub struct SqliteChatStore {
    rooms: RoomRepository,
    messages: MessageRepository,
    users: UserRepository,
}

impl SqliteChatStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            rooms: RoomRepository::new(pool.clone()),
            messages: MessageRepository::new(pool.clone()),
            users: UserRepository::new(pool),
        }
    }
}

#[async_trait]
impl ChatStore for SqliteChatStore {
    async fn find_room_for_participant(
        &self,
        room_id: &str,
        participant: &str,
    ) -> DatabaseResult<Option<ChatRoomRecord>> {
        self.rooms.find_for_participant(room_id, participant).await
    }

    async fn messages_between(
        &self,
        room: i64,
        first: &str,
        second: &str,
    ) -> DatabaseResult<Vec<MessageRecord>> {
        self.messages.find_between(room, first, second).await
    }

    async fn mark_read_for_receiver(&self, room: i64, receiver: &str) -> DatabaseResult<u64> {
        self.messages.mark_read_for_receiver(room, receiver).await
    }

    async fn participant_role(&self, participant: &str) -> DatabaseResult<Option<String>> {
        self.users.role_of(participant).await
    }

    async fn open_room(
        &self,
        user_id: &str,
        astrologer_id: &str,
    ) -> DatabaseResult<(ChatRoomRecord, bool)> {
        self.rooms.open(user_id, astrologer_id).await
    }

    async fn rooms_for(&self, participant: &str) -> DatabaseResult<Vec<ChatRoomRecord>> {
        self.rooms.list_for_participant(participant).await
    }

    async fn create_message(&self, message: &NewMessage) -> DatabaseResult<MessageRecord> {
        self.messages.create(message).await
    }

    async fn unread_count(&self, receiver: &str) -> DatabaseResult<i64> {
        self.messages.count_unread_for_receiver(receiver).await
    }
}
