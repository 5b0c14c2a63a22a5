//! InMemory room registry.
//!
//! The map lock is held only for the map operation itself. Admin
//! notifications, room locks and any I/O happen after it is released, so a
//! busy room never blocks lookups of another one.

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use roomcast_shared::time::Clock;
use tokio::sync::Mutex;

use crate::domain::{
    AdminEvent, AdminNotifier, Login, Room, RoomId, RoomRegistry, SharedRoom, Timestamp,
};

pub struct InMemoryRoomRegistry {
    rooms: Mutex<HashMap<RoomId, SharedRoom>>,
    notifier: Arc<dyn AdminNotifier>,
    clock: Arc<dyn Clock>,
}

impl InMemoryRoomRegistry {
    pub fn new(notifier: Arc<dyn AdminNotifier>, clock: Arc<dyn Clock>) -> Self {
        Self {
            rooms: Mutex::new(HashMap::new()),
            notifier,
            clock,
        }
    }

    pub async fn len(&self) -> usize {
        self.rooms.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rooms.lock().await.is_empty()
    }
}

#[async_trait]
impl RoomRegistry for InMemoryRoomRegistry {
    async fn get_or_create(&self, room_id: &RoomId, owner: Option<&Login>) -> SharedRoom {
        let (room, created) = {
            let mut rooms = self.rooms.lock().await;
            match rooms.get(room_id) {
                Some(room) => (room.clone(), false),
                None => {
                    let room = Room::new(
                        room_id.clone(),
                        owner.cloned(),
                        Timestamp::new(self.clock.now_millis()),
                    )
                    .into_shared();
                    rooms.insert(room_id.clone(), room.clone());
                    (room, true)
                }
            }
        };

        if created {
            tracing::info!("Room '{}' created", room_id);
            self.notifier.notify(AdminEvent::NewChat, room_id);
        }
        room
    }

    async fn get(&self, room_id: &RoomId) -> Option<SharedRoom> {
        self.rooms.lock().await.get(room_id).cloned()
    }

    async fn remove(&self, room_id: &RoomId) -> Option<SharedRoom> {
        let removed = self.rooms.lock().await.remove(room_id);
        if removed.is_some() {
            tracing::info!("Room '{}' removed from registry", room_id);
            self.notifier.notify(AdminEvent::ChatClosed, room_id);
        }
        removed
    }

    async fn list_ids(&self) -> Vec<RoomId> {
        let mut ids: Vec<RoomId> = self.rooms.lock().await.keys().cloned().collect();
        ids.sort();
        ids
    }

    async fn list_rooms(&self) -> Vec<SharedRoom> {
        let mut rooms: Vec<(RoomId, SharedRoom)> = self
            .rooms
            .lock()
            .await
            .iter()
            .map(|(id, room)| (id.clone(), room.clone()))
            .collect();
        rooms.sort_by(|a, b| a.0.cmp(&b.0));
        rooms.into_iter().map(|(_, room)| room).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{domain::notifier::MockAdminNotifier, infrastructure::notifier::TracingAdminNotifier};
    use mockall::predicate::{always, eq};
    use roomcast_shared::time::FixedClock;

    fn room_id(value: &str) -> RoomId {
        RoomId::new(value.to_string()).unwrap()
    }

    fn create_test_registry() -> InMemoryRoomRegistry {
        InMemoryRoomRegistry::new(
            Arc::new(TracingAdminNotifier),
            Arc::new(FixedClock::new(1000)),
        )
    }

    #[tokio::test]
    async fn test_get_or_create_creates_room_once() {
        // checks: get or create creates room once
        // given (precondition):
        let registry = create_test_registry();
        let alice = Login::new("alice".to_string()).unwrap();
        let bob = Login::new("bob".to_string()).unwrap();

        // when (operation):
        let first = registry.get_or_create(&room_id("r1"), Some(&alice)).await;
        let second = registry.get_or_create(&room_id("r1"), Some(&bob)).await;

        // then (expected result): same instance, owner recorded at creation only
        assert!(Arc::ptr_eq(&first, &second));
        let room = first.lock().await;
        assert_eq!(room.owner.as_ref().map(Login::as_str), Some("alice"));
        assert_eq!(room.created_at, Timestamp::new(1000));
        assert_eq!(registry.len().await, 1);
    }

    #[tokio::test]
    async fn test_get_does_not_create() {
        // checks: get does not create
        // given (precondition):
        let registry = create_test_registry();

        // when (operation):
        let room = registry.get(&room_id("missing")).await;

        // then (expected result):
        assert!(room.is_none());
        assert!(registry.is_empty().await);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_get_or_create_yields_one_room_and_one_notification() {
        // checks: concurrent get or create yields one room and one notification
        // given (precondition):
        let mut notifier = MockAdminNotifier::new();
        notifier
            .expect_notify()
            .with(eq(AdminEvent::NewChat), eq(room_id("r1")))
            .times(1)
            .return_const(());
        let registry = Arc::new(InMemoryRoomRegistry::new(
            Arc::new(notifier),
            Arc::new(FixedClock::new(0)),
        ));

        // when (operation): sixteen contexts race on the same unknown id
        let mut handles = Vec::new();
        for _ in 0..16 {
            let registry = registry.clone();
            handles.push(tokio::spawn(async move {
                registry.get_or_create(&room_id("r1"), None).await
            }));
        }
        let mut rooms = Vec::new();
        for handle in handles {
            rooms.push(handle.await.unwrap());
        }

        // then (expected result):
        assert!(rooms.iter().all(|room| Arc::ptr_eq(room, &rooms[0])));
        assert_eq!(registry.list_ids().await, vec![room_id("r1")]);
    }

    #[tokio::test]
    async fn test_remove_notifies_only_when_present() {
        // checks: remove notifies only when present
        // given (precondition):
        let mut notifier = MockAdminNotifier::new();
        notifier
            .expect_notify()
            .with(eq(AdminEvent::NewChat), always())
            .times(1)
            .return_const(());
        notifier
            .expect_notify()
            .with(eq(AdminEvent::ChatClosed), eq(room_id("r1")))
            .times(1)
            .return_const(());
        let registry = InMemoryRoomRegistry::new(Arc::new(notifier), Arc::new(FixedClock::new(0)));
        registry.get_or_create(&room_id("r1"), None).await;

        // when (operation):
        let first = registry.remove(&room_id("r1")).await;
        let second = registry.remove(&room_id("r1")).await;

        // then (expected result):
        assert!(first.is_some());
        assert!(second.is_none());
        assert!(registry.is_empty().await);
    }

    #[tokio::test]
    async fn test_list_ids_is_sorted_snapshot() {
        // checks: list ids is sorted snapshot
        // given (precondition):
        let registry = create_test_registry();
        for id in ["charlie", "alpha", "bravo"] {
            registry.get_or_create(&room_id(id), None).await;
        }

        // when (operation):
        let ids = registry.list_ids().await;
        let rooms = registry.list_rooms().await;

        // then (expected result):
        assert_eq!(ids, vec![room_id("alpha"), room_id("bravo"), room_id("charlie")]);
        assert_eq!(rooms.len(), 3);
        assert_eq!(rooms[0].lock().await.id, room_id("alpha"));
    }
}
