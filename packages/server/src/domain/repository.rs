//! Repository traits.
//!
//! The use cases depend on these seams; the infrastructure layer provides the
//! implementations.

use async_trait::async_trait;

use super::{
    entity::HistoryRecord,
    error::HistoryError,
    room::SharedRoom,
    value_object::{Login, RoomId},
};

/// Process-wide directory of live rooms.
#[async_trait]
pub trait RoomRegistry: Send + Sync {
    /// Return the room for `room_id`, creating it on first use.
    ///
    /// `owner` is only recorded when the room is created.
    async fn get_or_create(&self, room_id: &RoomId, owner: Option<&Login>) -> SharedRoom;

    async fn get(&self, room_id: &RoomId) -> Option<SharedRoom>;

    /// Remove the room from the registry and hand it back to the caller.
    async fn remove(&self, room_id: &RoomId) -> Option<SharedRoom>;

    /// Registered room ids, sorted.
    async fn list_ids(&self) -> Vec<RoomId>;

    /// Registered rooms, sorted by id.
    async fn list_rooms(&self) -> Vec<SharedRoom>;
}

/// Append-only per-room message log.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    async fn append(&self, room_id: &RoomId, record: &HistoryRecord) -> Result<(), HistoryError>;

    /// Records in append order; empty when the room has no log yet.
    async fn read_all(&self, room_id: &RoomId) -> Result<Vec<HistoryRecord>, HistoryError>;
}

/// Login → rooms created by that login.
#[async_trait]
pub trait UserChatIndex: Send + Sync {
    /// Record `room_id` for `login` unless already present. Returns whether it
    /// was added.
    async fn associate(&self, login: &Login, room_id: &RoomId) -> bool;

    /// Rooms of `login` in association order.
    async fn chats_of(&self, login: &Login) -> Vec<RoomId>;

    /// Drop `room_id` from every login. Returns the number of logins touched.
    async fn prune_room(&self, room_id: &RoomId) -> usize;
}
