//! Append-only history logs on disk.
//!
//! Each room has one `<room_id>.txt` file under the history directory. Every
//! line is one JSON object. Access to a room's file is serialized by a lock
//! kept for that room only; different rooms never wait on each other.

use std::{
    collections::HashMap,
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::Arc,
};

use async_trait::async_trait;
use tokio::{fs, io::AsyncWriteExt, sync::Mutex};

use crate::domain::{HistoryError, HistoryRecord, HistoryStore, RoomId};

const LOG_EXTENSION: &str = "txt";

pub struct FileHistoryStore {
    dir: PathBuf,
    file_locks: Mutex<HashMap<RoomId, Arc<Mutex<()>>>>,
}

impl FileHistoryStore {
    /// Open the store rooted at `dir`, creating the directory if needed.
    pub async fn open(dir: impl Into<PathBuf>) -> std::io::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).await?;
        tracing::info!("History logs stored in {}", dir.display());
        Ok(Self {
            dir,
            file_locks: Mutex::new(HashMap::new()),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the log for `room_id`.
    ///
    /// `RoomId` only admits `[A-Za-z0-9._-]`, so the result always stays inside
    /// the history directory.
    pub fn log_path(&self, room_id: &RoomId) -> PathBuf {
        self.dir.join(format!("{}.{}", room_id.as_str(), LOG_EXTENSION))
    }

    async fn file_lock(&self, room_id: &RoomId) -> Arc<Mutex<()>> {
        self.file_locks
            .lock()
            .await
            .entry(room_id.clone())
            .or_default()
            .clone()
    }

    /// Hand back a lock taken with `file_lock`, dropping its entry when no
    /// other caller holds it. Must be called after the guard is released.
    async fn release_file_lock(&self, room_id: &RoomId, lock: Arc<Mutex<()>>) {
        let mut locks = self.file_locks.lock().await;
        // The map and `lock` are the only owners left.
        if Arc::strong_count(&lock) == 2 {
            locks.remove(room_id);
        }
    }

    async fn append_line(&self, room_id: &RoomId, line: &str) -> Result<(), HistoryError> {
        let io_error = |source: std::io::Error| HistoryError::Io {
            room_id: room_id.clone(),
            source,
        };
        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.log_path(room_id))
            .await
            .map_err(io_error)?;
        file.write_all(line.as_bytes()).await.map_err(io_error)?;
        file.flush().await.map_err(io_error)
    }

    async fn read_log(&self, room_id: &RoomId) -> Result<Vec<HistoryRecord>, HistoryError> {
        match fs::read_to_string(self.log_path(room_id)).await {
            Ok(contents) => Ok(parse_log(room_id, &contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(source) => Err(HistoryError::Io {
                room_id: room_id.clone(),
                source,
            }),
        }
    }
}

/// Parse a log, skipping lines that are not valid records.
fn parse_log(room_id: &RoomId, contents: &str) -> Vec<HistoryRecord> {
    contents
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .filter_map(|(index, line)| match serde_json::from_str(line) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!(
                    "Skipping malformed history record at line {} of room '{}': {}",
                    index + 1,
                    room_id,
                    e
                );
                None
            }
        })
        .collect()
}

#[async_trait]
impl HistoryStore for FileHistoryStore {
    async fn append(&self, room_id: &RoomId, record: &HistoryRecord) -> Result<(), HistoryError> {
        let mut line = serde_json::to_string(record)?;
        line.push('\n');

        let lock = self.file_lock(room_id).await;
        let result = {
            let _guard = lock.lock().await;
            self.append_line(room_id, &line).await
        };
        self.release_file_lock(room_id, lock).await;

        result?;
        tracing::debug!("Appended history record to room '{}'", room_id);
        Ok(())
    }

    async fn read_all(&self, room_id: &RoomId) -> Result<Vec<HistoryRecord>, HistoryError> {
        let lock = self.file_lock(room_id).await;
        let result = {
            let _guard = lock.lock().await;
            self.read_log(room_id).await
        };
        self.release_file_lock(room_id, lock).await;
        result
    }
}
