//! Consultation room management.

use std::sync::Arc;

use astroconsult_auth::{Caller, Role};
use tracing::{debug, warn};

use crate::entities::ChatRoom;
use crate::repositories::ChatStore;
use crate::types::{ChatError, ChatResult};

#[derive(Clone)]
pub struct ChatService {
    store: Arc<dyn ChatStore>,
}

impl ChatService {
    pub fn new(store: Arc<dyn ChatStore>) -> Self {
        Self { store }
    }

    /// Open the consultation room between the calling user and an astrologer.
    ///
    /// Returns the existing room when the pair already has one; the flag is
    /// `true` only for a newly created room.
    pub async fn open_room(
        &self,
        caller: &Caller,
        astrologer_id: &str,
    ) -> ChatResult<(ChatRoom, bool)> {
        if caller.role != Role::User {
            warn!(caller = %caller.id, role = %caller.role, "non-user tried to open a room");
            return Err(ChatError::invalid_participant(
                "only user accounts can open consultations",
            ));
        }

        if caller.id == astrologer_id {
            return Err(ChatError::invalid_participant("cannot consult yourself"));
        }

        let role = self.store.participant_role(astrologer_id).await?;
        let is_astrologer = role
            .as_deref()
            .and_then(|role| role.parse::<Role>().ok())
            .is_some_and(|role| role == Role::Astrologer);

        if !is_astrologer {
            return Err(ChatError::invalid_participant(format!(
                "{astrologer_id} is not an astrologer"
            )));
        }

        let (record, created) = self.store.open_room(&caller.id, astrologer_id).await?;
        debug!(room = %record.public_id, created, "resolved consultation room");

        Ok((ChatRoom::from(record), created))
    }

    /// Rooms the caller takes part in on either side, newest first
    pub async fn list_rooms(&self, caller: &Caller) -> ChatResult<Vec<ChatRoom>> {
        let rooms = self.store.rooms_for(&caller.id).await?;
        Ok(rooms.into_iter().map(ChatRoom::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::MockChatStore;
    use astroconsult_database::ChatRoomRecord;

    #[tokio::test]
    async fn open_room_rejects_astrologer_callers_without_store_access() {
        let service = ChatService::new(Arc::new(MockChatStore::new()));
        let caller = Caller::new("astroB", Role::Astrologer);

        let result = service.open_room(&caller, "astroC").await;

        assert!(matches!(result, Err(ChatError::InvalidParticipant(_))));
    }

    #[tokio::test]
    async fn open_room_requires_an_astrologer_counterpart() {
        let mut store = MockChatStore::new();
        store
            .expect_participant_role()
            .returning(|_| Ok(Some("user".to_string())));
        store.expect_open_room().times(0);

        let service = ChatService::new(Arc::new(store));
        let caller = Caller::new("userA", Role::User);

        let result = service.open_room(&caller, "userZ").await;

        assert!(matches!(result, Err(ChatError::InvalidParticipant(_))));
    }

    #[tokio::test]
    async fn open_room_returns_room_for_valid_pair() {
        let mut store = MockChatStore::new();
        store
            .expect_participant_role()
            .returning(|_| Ok(Some("astrologer".to_string())));
        store.expect_open_room().times(1).returning(|user, astrologer| {
            Ok((
                ChatRoomRecord {
                    id: 1,
                    public_id: "room1".into(),
                    user_id: user.to_string(),
                    astrologer_id: astrologer.to_string(),
                    created_at: "2024-01-01T00:00:00Z".into(),
                },
                true,
            ))
        });

        let service = ChatService::new(Arc::new(store));
        let caller = Caller::new("userA", Role::User);

        let (room, created) = service.open_room(&caller, "astroB").await.unwrap();

        assert!(created);
        assert_eq!(room.id, "room1");
        assert_eq!(room.user_id, "userA");
        assert_eq!(room.astrologer_id, "astroB");
    }
}
