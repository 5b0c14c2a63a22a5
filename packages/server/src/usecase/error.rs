//! Use case error types.

use thiserror::Error;

use crate::domain::{ConnectionError, HistoryError, RoomId};

#[derive(Debug, Error)]
pub enum CreateChatError {
    #[error("history unavailable: {0}")]
    HistoryUnavailable(#[source] HistoryError),

    #[error("failed to encode chat history: {0}")]
    EncodeFailed(#[source] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum JoinChatError {
    #[error("room '{0}' not found")]
    RoomNotFound(RoomId),

    #[error("history unavailable: {0}")]
    HistoryUnavailable(#[source] HistoryError),

    #[error("failed to encode chat history: {0}")]
    EncodeFailed(#[source] serde_json::Error),

    #[error("failed to deliver chat history: {0}")]
    DeliveryFailed(#[source] ConnectionError),
}

#[derive(Debug, Error)]
pub enum SendMessageError {
    #[error("room '{0}' not found")]
    RoomNotFound(RoomId),

    #[error("failed to encode broadcast: {0}")]
    EncodeFailed(#[source] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CloseChatError {
    #[error("room '{0}' not found")]
    RoomNotFound(RoomId),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GetRoomDetailError {
    #[error("room '{0}' not found")]
    RoomNotFound(RoomId),
}
