//! Outbound protocol messages produced by the relay.

use serde::{Deserialize, Serialize};

use super::{entity::HistoryRecord, value_object::RoomId};

/// Replies tagged with the `action` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Reply {
    ChatHistory { history: Vec<HistoryRecord> },
    ListChats { chats: Vec<RoomId> },
    ListUserChats { chats: Vec<RoomId> },
}

impl Reply {
    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Payload fanned out to every room member on `send_message`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatBroadcast {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl ChatBroadcast {
    pub fn from_record(record: &HistoryRecord) -> Self {
        Self {
            message: record.message().to_string(),
            role: record.role().map(str::to_string),
        }
    }

    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
