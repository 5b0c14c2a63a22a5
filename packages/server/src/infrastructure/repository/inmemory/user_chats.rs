//! InMemory login → rooms index.
//!
//! `prune_room` scans every login. The cost is O(logins × rooms per login),
//! acceptable for a single relay process.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{Login, RoomId, UserChatIndex};

#[derive(Default)]
pub struct InMemoryUserChatIndex {
    chats: Mutex<HashMap<Login, Vec<RoomId>>>,
}

impl InMemoryUserChatIndex {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserChatIndex for InMemoryUserChatIndex {
    async fn associate(&self, login: &Login, room_id: &RoomId) -> bool {
        let mut chats = self.chats.lock().await;
        let rooms = chats.entry(login.clone()).or_default();
        if rooms.contains(room_id) {
            return false;
        }
        rooms.push(room_id.clone());
        true
    }

    async fn chats_of(&self, login: &Login) -> Vec<RoomId> {
        self.chats
            .lock()
            .await
            .get(login)
            .cloned()
            .unwrap_or_default()
    }

    async fn prune_room(&self, room_id: &RoomId) -> usize {
        let mut chats = self.chats.lock().await;
        let mut touched = 0;
        chats.retain(|_, rooms| {
            let before = rooms.len();
            rooms.retain(|id| id != room_id);
            if rooms.len() != before {
                touched += 1;
            }
            !rooms.is_empty()
        });
        touched
    }
}
