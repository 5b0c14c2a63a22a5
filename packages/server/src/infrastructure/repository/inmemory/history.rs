//! Volatile history store, used with `--ephemeral` and in tests.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{HistoryError, HistoryRecord, HistoryStore, RoomId};

#[derive(Default)]
pub struct InMemoryHistoryStore {
    logs: Mutex<HashMap<RoomId, Vec<HistoryRecord>>>,
}

impl InMemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HistoryStore for InMemoryHistoryStore {
    async fn append(&self, room_id: &RoomId, record: &HistoryRecord) -> Result<(), HistoryError> {
        self.logs
            .lock()
            .await
            .entry(room_id.clone())
            .or_default()
            .push(record.clone());
        Ok(())
    }

    async fn read_all(&self, room_id: &RoomId) -> Result<Vec<HistoryRecord>, HistoryError> {
        Ok(self
            .logs
            .lock()
            .await
            .get(room_id)
            .cloned()
            .unwrap_or_default())
    }
}
