//! UseCase: room snapshots for the HTTP API.

use std::sync::Arc;

use crate::domain::{RoomId, RoomRegistry, RoomSnapshot};

use super::error::GetRoomDetailError;

pub struct GetRoomsUseCase {
    registry: Arc<dyn RoomRegistry>,
}

impl GetRoomsUseCase {
    pub fn new(registry: Arc<dyn RoomRegistry>) -> Self {
        Self { registry }
    }

    /// Snapshots of every registered room, sorted by id.
    pub async fn execute(&self) -> Vec<RoomSnapshot> {
        let mut snapshots = Vec::new();
        for room in self.registry.list_rooms().await {
            snapshots.push(room.lock().await.snapshot());
        }
        snapshots
    }
}

pub struct GetRoomDetailUseCase {
    registry: Arc<dyn RoomRegistry>,
}

impl GetRoomDetailUseCase {
    pub fn new(registry: Arc<dyn RoomRegistry>) -> Self {
        Self { registry }
    }

    pub async fn execute(&self, room_id: RoomId) -> Result<RoomSnapshot, GetRoomDetailError> {
        let room = self
            .registry
            .get(&room_id)
            .await
            .ok_or(GetRoomDetailError::RoomNotFound(room_id))?;
        let snapshot = room.lock().await.snapshot();
        Ok(snapshot)
    }
}
