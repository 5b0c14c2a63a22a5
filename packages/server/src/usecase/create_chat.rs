//! UseCase: create a room or join it as its creator.
//!
//! Every current member receives the full history afterwards, so all members
//! resynchronize whenever someone (re)creates the room.

use std::sync::Arc;

use crate::domain::{
    BroadcastReport, HistoryStore, Login, MemberHandle, Reply, RoomId, RoomRegistry, SharedRoom,
    UserChatIndex,
};

use super::error::CreateChatError;

pub struct CreateChatUseCase {
    registry: Arc<dyn RoomRegistry>,
    history: Arc<dyn HistoryStore>,
    user_chats: Arc<dyn UserChatIndex>,
}

impl CreateChatUseCase {
    pub fn new(
        registry: Arc<dyn RoomRegistry>,
        history: Arc<dyn HistoryStore>,
        user_chats: Arc<dyn UserChatIndex>,
    ) -> Self {
        Self {
            registry,
            history,
            user_chats,
        }
    }

    /// Create or join `room_id` and replay its history to every member.
    ///
    /// The member stays in the room even when the history cannot be read.
    pub async fn execute(
        &self,
        member: MemberHandle,
        room_id: RoomId,
        login: Option<Login>,
    ) -> Result<BroadcastReport, CreateChatError> {
        let room = self.join_live_room(member, &room_id, login.as_ref()).await;

        let history = self
            .history
            .read_all(&room_id)
            .await
            .map_err(CreateChatError::HistoryUnavailable)?;
        let payload = Reply::ChatHistory { history }
            .encode()
            .map_err(CreateChatError::EncodeFailed)?;

        let report = room.lock().await.broadcast(&payload);
        tracing::info!(
            "Sent history of room '{}' to {} member(s)",
            room_id,
            report.delivered
        );
        Ok(report)
    }

    /// Add `member` to the live room for `room_id` and record the room for
    /// `owner`.
    ///
    /// A close may land between the lookup and the room lock. The registry
    /// drops a room before closing it, so looking the id up again yields a
    /// fresh room. The login is associated under the room lock: `close_chat`
    /// prunes the index only after closing the room, so the association is
    /// either pruned or made against the fresh room.
    async fn join_live_room(
        &self,
        member: MemberHandle,
        room_id: &RoomId,
        owner: Option<&Login>,
    ) -> SharedRoom {
        loop {
            let room = self.registry.get_or_create(room_id, owner).await;
            {
                let mut guard = room.lock().await;
                if guard.is_closed() {
                    continue;
                }
                guard.add_member(member.clone());
                if let Some(login) = owner
                    && self.user_chats.associate(login, room_id).await
                {
                    tracing::debug!("Associated room '{}' with login '{}'", room_id, login);
                }
            }
            return room;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::HistoryRecord,
        infrastructure::repository::FileHistoryStore,
        usecase::test_support::{Fixture, TestMember, login, room_id},
    };
    use serde_json::json;
    use tempfile::TempDir;

    fn create_usecase(fixture: &Fixture) -> CreateChatUseCase {
        CreateChatUseCase::new(
            fixture.registry.clone(),
            fixture.history.clone(),
            fixture.user_chats.clone(),
        )
    }

    #[tokio::test]
    async fn test_create_chat_registers_room_and_sends_empty_history() {
        // checks: create chat registers room and sends empty history
        // given (precondition):
        let fixture = Fixture::new();
        let usecase = create_usecase(&fixture);
        let mut alice = TestMember::new();

        // when (operation):
        let report = usecase
            .execute(alice.handle(), room_id("r1"), Some(login("alice")))
            .await
            .unwrap();

        // then (expected result):
        assert_eq!(report.delivered, 1);
        assert_eq!(
            alice.drain(),
            vec![json!({"action": "chat_history", "history": []})]
        );
        assert_eq!(fixture.registry.list_ids().await, vec![room_id("r1")]);
        assert_eq!(
            fixture.user_chats.chats_of(&login("alice")).await,
            vec![room_id("r1")]
        );
        let room = fixture.registry.get(&room_id("r1")).await.unwrap();
        assert!(room.lock().await.contains_member(&alice.id()));
    }

    #[tokio::test]
    async fn test_create_chat_resends_history_to_every_member() {
        // checks: create chat resends history to every member
        // given (precondition): alice already in the room with one message logged
        let fixture = Fixture::new();
        let usecase = create_usecase(&fixture);
        let mut alice = TestMember::new();
        let mut bob = TestMember::new();
        usecase
            .execute(alice.handle(), room_id("r1"), Some(login("alice")))
            .await
            .unwrap();
        alice.drain();
        let record = HistoryRecord::new().with_field("message", "hi");
        fixture.history.append(&room_id("r1"), &record).await.unwrap();

        // when (operation): bob creates the same room
        let report = usecase
            .execute(bob.handle(), room_id("r1"), Some(login("bob")))
            .await
            .unwrap();

        // then (expected result): both members resynchronize
        let expected = json!({"action": "chat_history", "history": [{"message": "hi"}]});
        assert_eq!(report.delivered, 2);
        assert_eq!(alice.drain(), vec![expected.clone()]);
        assert_eq!(bob.drain(), vec![expected]);
        let room = fixture.registry.get(&room_id("r1")).await.unwrap();
        assert_eq!(room.lock().await.owner, Some(login("alice")));
    }

    #[tokio::test]
    async fn test_create_chat_twice_keeps_single_membership_and_index_entry() {
        // checks: create chat twice keeps single membership and index entry
        // given (precondition):
        let fixture = Fixture::new();
        let usecase = create_usecase(&fixture);
        let alice = TestMember::new();

        // when (operation):
        for _ in 0..2 {
            usecase
                .execute(alice.handle(), room_id("r1"), Some(login("alice")))
                .await
                .unwrap();
        }

        // then (expected result):
        let room = fixture.registry.get(&room_id("r1")).await.unwrap();
        assert_eq!(room.lock().await.member_count(), 1);
        assert_eq!(
            fixture.user_chats.chats_of(&login("alice")).await,
            vec![room_id("r1")]
        );
    }

    #[tokio::test]
    async fn test_create_chat_without_login_skips_index() {
        // checks: create chat without login skips index
        // given (precondition):
        let fixture = Fixture::new();
        let usecase = create_usecase(&fixture);
        let alice = TestMember::new();

        // when (operation):
        let result = usecase.execute(alice.handle(), room_id("r1"), None).await;

        // then (expected result):
        assert!(result.is_ok());
        assert_eq!(fixture.registry.list_ids().await, vec![room_id("r1")]);
        assert!(fixture.user_chats.chats_of(&login("alice")).await.is_empty());
    }

    #[tokio::test]
    async fn test_create_chat_after_close_builds_fresh_room() {
        // checks: create chat after close builds fresh room
        // given (precondition): a room that was closed but is still referenced by the caller
        let fixture = Fixture::new();
        let usecase = create_usecase(&fixture);
        let old_room = fixture.registry.get_or_create(&room_id("r1"), None).await;
        fixture.registry.remove(&room_id("r1")).await;
        old_room.lock().await.close();
        let alice = TestMember::new();

        // when (operation):
        usecase
            .execute(alice.handle(), room_id("r1"), None)
            .await
            .unwrap();

        // then (expected result):
        let room = fixture.registry.get(&room_id("r1")).await.unwrap();
        assert!(!Arc::ptr_eq(&room, &old_room));
        assert!(room.lock().await.contains_member(&alice.id()));
    }

    #[tokio::test]
    async fn test_create_chat_history_failure_keeps_membership() {
        // checks: create chat history failure keeps membership
        // given (precondition): a file store whose log path is a directory
        let dir = TempDir::new().unwrap();
        let history = Arc::new(FileHistoryStore::open(dir.path()).await.unwrap());
        std::fs::create_dir(history.log_path(&room_id("r1"))).unwrap();
        let fixture = Fixture::new();
        let usecase =
            CreateChatUseCase::new(fixture.registry.clone(), history, fixture.user_chats.clone());
        let mut alice = TestMember::new();

        // when (operation):
        let result = usecase
            .execute(alice.handle(), room_id("r1"), Some(login("alice")))
            .await;

        // then (expected result): nothing is sent, but alice is a member and the room is indexed
        assert!(matches!(result, Err(CreateChatError::HistoryUnavailable(_))));
        assert!(alice.drain().is_empty());
        let room = fixture.registry.get(&room_id("r1")).await.unwrap();
        assert!(room.lock().await.contains_member(&alice.id()));
        assert_eq!(
            fixture.user_chats.chats_of(&login("alice")).await,
            vec![room_id("r1")]
        );
    }
}
