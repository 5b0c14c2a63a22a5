//! UseCase: disconnect cleanup for a finished session.

use std::sync::Arc;

use crate::domain::{ConnectionId, RoomId, RoomRegistry};

pub struct LeaveRoomsUseCase {
    registry: Arc<dyn RoomRegistry>,
}

impl LeaveRoomsUseCase {
    pub fn new(registry: Arc<dyn RoomRegistry>) -> Self {
        Self { registry }
    }

    /// Remove `connection_id` from each of `rooms` that is still registered.
    ///
    /// Returns the number of rooms the connection was actually removed from.
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        rooms: impl IntoIterator<Item = RoomId>,
    ) -> usize {
        let mut left = 0;
        for room_id in rooms {
            let Some(room) = self.registry.get(&room_id).await else {
                continue;
            };
            if room.lock().await.remove_member(&connection_id) {
                tracing::debug!("Member {} left room '{}'", connection_id, room_id);
                left += 1;
            }
        }
        left
    }
}
