//! Shared fixtures for use case tests.

use std::sync::Arc;

use roomcast_shared::time::FixedClock;
use tokio::sync::mpsc;

use crate::{
    domain::{Connection, Login, MemberHandle, RoomId},
    infrastructure::{
        connection::WebSocketConnection,
        notifier::TracingAdminNotifier,
        repository::{InMemoryHistoryStore, InMemoryRoomRegistry, InMemoryUserChatIndex},
    },
};

pub const CREATED_AT: i64 = 1672531200000;

pub struct Fixture {
    pub registry: Arc<InMemoryRoomRegistry>,
    pub history: Arc<InMemoryHistoryStore>,
    pub user_chats: Arc<InMemoryUserChatIndex>,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            registry: Arc::new(InMemoryRoomRegistry::new(
                Arc::new(TracingAdminNotifier),
                Arc::new(FixedClock::new(CREATED_AT)),
            )),
            history: Arc::new(InMemoryHistoryStore::new()),
            user_chats: Arc::new(InMemoryUserChatIndex::new()),
        }
    }
}

/// A member backed by a real outbound queue.
pub struct TestMember {
    pub connection: Arc<WebSocketConnection>,
    pub outbox: mpsc::Receiver<String>,
}

impl TestMember {
    pub fn new() -> Self {
        let (connection, outbox) = WebSocketConnection::channel(16);
        Self {
            connection: Arc::new(connection),
            outbox,
        }
    }

    pub fn handle(&self) -> MemberHandle {
        self.connection.clone()
    }

    pub fn id(&self) -> crate::domain::ConnectionId {
        self.connection.id()
    }

    /// Payloads queued so far, decoded as JSON.
    pub fn drain(&mut self) -> Vec<serde_json::Value> {
        let mut payloads = Vec::new();
        while let Ok(payload) = self.outbox.try_recv() {
            payloads.push(serde_json::from_str(&payload).unwrap());
        }
        payloads
    }
}

pub fn room_id(value: &str) -> RoomId {
    RoomId::new(value.to_string()).unwrap()
}

pub fn login(value: &str) -> Login {
    Login::new(value.to_string()).unwrap()
}
