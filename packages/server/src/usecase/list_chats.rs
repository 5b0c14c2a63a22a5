//! UseCase: room listings for the protocol replies.

use std::sync::Arc;

use crate::domain::{Login, RoomId, RoomRegistry, UserChatIndex};

pub struct ListChatsUseCase {
    registry: Arc<dyn RoomRegistry>,
}

impl ListChatsUseCase {
    pub fn new(registry: Arc<dyn RoomRegistry>) -> Self {
        Self { registry }
    }

    /// Every registered room id, sorted.
    pub async fn execute(&self) -> Vec<RoomId> {
        self.registry.list_ids().await
    }
}

pub struct ListUserChatsUseCase {
    user_chats: Arc<dyn UserChatIndex>,
}

impl ListUserChatsUseCase {
    pub fn new(user_chats: Arc<dyn UserChatIndex>) -> Self {
        Self { user_chats }
    }

    /// Rooms created by `login`, in creation order.
    pub async fn execute(&self, login: &Login) -> Vec<RoomId> {
        self.user_chats.chats_of(login).await
    }
}
