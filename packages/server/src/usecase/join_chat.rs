//! UseCase: join an existing room.

use std::sync::Arc;

use crate::domain::{Connection, HistoryStore, MemberHandle, Reply, RoomId, RoomRegistry};

use super::error::JoinChatError;

pub struct JoinChatUseCase {
    registry: Arc<dyn RoomRegistry>,
    history: Arc<dyn HistoryStore>,
}

impl JoinChatUseCase {
    pub fn new(registry: Arc<dyn RoomRegistry>, history: Arc<dyn HistoryStore>) -> Self {
        Self { registry, history }
    }

    /// Add `member` to `room_id` and send the history to that member only.
    ///
    /// Unlike `create_chat`, joining never creates the room.
    pub async fn execute(&self, member: MemberHandle, room_id: RoomId) -> Result<(), JoinChatError> {
        let member_id = member.id();
        let room = self
            .registry
            .get(&room_id)
            .await
            .ok_or_else(|| JoinChatError::RoomNotFound(room_id.clone()))?;

        {
            let mut guard = room.lock().await;
            // Closed between lookup and lock: the room is gone for this caller.
            if guard.is_closed() {
                return Err(JoinChatError::RoomNotFound(room_id));
            }
            if guard.add_member(member) {
                tracing::info!("Member {} joined room '{}'", member_id, room_id);
            }
        }

        let history = self
            .history
            .read_all(&room_id)
            .await
            .map_err(JoinChatError::HistoryUnavailable)?;
        let payload = Reply::ChatHistory { history }
            .encode()
            .map_err(JoinChatError::EncodeFailed)?;

        room.lock()
            .await
            .send_to(&member_id, &payload)
            .map_err(JoinChatError::DeliveryFailed)
    }
}
