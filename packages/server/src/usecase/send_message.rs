//! UseCase: broadcast a message to a room and persist it.

use std::sync::Arc;

use crate::domain::{
    BroadcastReport, ChatBroadcast, HistoryRecord, HistoryStore, RoomId, RoomRegistry,
};

use super::error::SendMessageError;

/// Outcome of a `send_message`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SendReport {
    pub delivery: BroadcastReport,
    /// `false` when the history append failed. Delivery is never undone.
    pub persisted: bool,
}

pub struct SendMessageUseCase {
    registry: Arc<dyn RoomRegistry>,
    history: Arc<dyn HistoryStore>,
}

impl SendMessageUseCase {
    pub fn new(registry: Arc<dyn RoomRegistry>, history: Arc<dyn HistoryStore>) -> Self {
        Self { registry, history }
    }

    /// Fan `{message, role}` out to every member of `room_id`, then append the
    /// whole inbound `record` to the room's history.
    pub async fn execute(
        &self,
        room_id: RoomId,
        record: HistoryRecord,
    ) -> Result<SendReport, SendMessageError> {
        let room = self
            .registry
            .get(&room_id)
            .await
            .ok_or_else(|| SendMessageError::RoomNotFound(room_id.clone()))?;

        let payload = ChatBroadcast::from_record(&record)
            .encode()
            .map_err(SendMessageError::EncodeFailed)?;
        let delivery = room.lock().await.broadcast(&payload);
        tracing::debug!(
            "Broadcast to room '{}': delivered={}, pruned={}",
            room_id,
            delivery.delivered,
            delivery.pruned
        );

        let persisted = match self.history.append(&room_id, &record).await {
            Ok(()) => true,
            Err(e) => {
                tracing::error!("Failed to persist message for room '{}': {}", room_id, e);
                false
            }
        };

        Ok(SendReport {
            delivery,
            persisted,
        })
    }
}
