//! UseCase: close a room for everyone.

use std::sync::Arc;

use crate::domain::{RoomId, RoomRegistry, UserChatIndex};

use super::error::CloseChatError;

pub struct CloseChatUseCase {
    registry: Arc<dyn RoomRegistry>,
    user_chats: Arc<dyn UserChatIndex>,
}

impl CloseChatUseCase {
    pub fn new(registry: Arc<dyn RoomRegistry>, user_chats: Arc<dyn UserChatIndex>) -> Self {
        Self {
            registry,
            user_chats,
        }
    }

    /// Close `room_id` and return how many member connections were closed.
    ///
    /// The room leaves the registry first, then its members are disconnected,
    /// and only then is it pruned from the index. A `create_chat` racing with
    /// the close either associated its login before the close, and is pruned
    /// here, or sees a closed room and retries against a fresh one. History is
    /// kept.
    pub async fn execute(&self, room_id: RoomId) -> Result<usize, CloseChatError> {
        let room = self
            .registry
            .remove(&room_id)
            .await
            .ok_or_else(|| CloseChatError::RoomNotFound(room_id.clone()))?;

        let closed = room.lock().await.close();
        tracing::info!("Room '{}' closed, {} member(s) disconnected", room_id, closed);

        let pruned = self.user_chats.prune_room(&room_id).await;
        tracing::debug!("Removed room '{}' from {} login(s)", room_id, pruned);
        Ok(closed)
    }
}
