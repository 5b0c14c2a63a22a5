//! Domain error types.

use thiserror::Error;

use super::value_object::{ConnectionId, RoomId};

/// Validation failures when building value objects from wire input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    #[error("room id must not be empty")]
    EmptyRoomId,

    #[error("room id is too long ({0} bytes)")]
    RoomIdTooLong(usize),

    #[error("room id '{0}' contains characters outside [A-Za-z0-9._-]")]
    InvalidRoomId(String),

    #[error("login must not be empty")]
    EmptyLogin,

    #[error("login is too long ({0} characters)")]
    LoginTooLong(usize),
}

/// Delivery failure for a single member connection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectionError {
    #[error("connection {0} is closed")]
    Closed(ConnectionId),

    #[error("connection {0} is not draining its outbound queue")]
    Backpressure(ConnectionId),
}

/// History store failures.
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("history I/O failed for room '{room_id}': {source}")]
    Io {
        room_id: RoomId,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode history record: {0}")]
    Encode(#[from] serde_json::Error),
}
