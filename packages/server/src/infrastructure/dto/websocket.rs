//! Inbound WebSocket frames.
//!
//! A frame is a flat JSON object of string values that always names an
//! `action`. Decoding happens in two steps: the frame must parse as a string
//! map (failure ends the session), then the map is turned into a
//! [`ClientAction`]. Unknown actions are not decode errors.

use std::collections::HashMap;

use crate::domain::HistoryRecord;

pub const ACTION: &str = "action";
pub const CHAT_ID: &str = "chat_id";
pub const LOGIN: &str = "login";

/// A decoded inbound frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InboundMessage(HashMap<String, String>);

impl InboundMessage {
    pub fn decode(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text).map(Self)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn action(&self) -> &str {
        self.get(ACTION).unwrap_or_default()
    }
}

impl<K, V> FromIterator<(K, V)> for InboundMessage
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Protocol actions, keyed by the `action` field.
///
/// Room ids and logins are carried raw; validation happens in the dispatcher
/// so that an invalid value turns into a logged no-op instead of ending the
/// session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientAction {
    CreateChat {
        chat_id: Option<String>,
        login: Option<String>,
    },
    ListChats,
    ListUserChats {
        login: Option<String>,
    },
    JoinChat {
        chat_id: Option<String>,
    },
    SendMessage {
        chat_id: Option<String>,
        record: HistoryRecord,
    },
    CloseChat {
        chat_id: Option<String>,
    },
    Unknown(String),
}

impl ClientAction {
    pub fn name(&self) -> &str {
        match self {
            ClientAction::CreateChat { .. } => "create_chat",
            ClientAction::ListChats => "list_chats",
            ClientAction::ListUserChats { .. } => "list_user_chats",
            ClientAction::JoinChat { .. } => "join_chat",
            ClientAction::SendMessage { .. } => "send_message",
            ClientAction::CloseChat { .. } => "close_chat",
            ClientAction::Unknown(name) => name,
        }
    }
}

impl From<InboundMessage> for ClientAction {
    fn from(message: InboundMessage) -> Self {
        let field = |key: &str| message.get(key).map(str::to_string);
        match message.action() {
            "create_chat" => ClientAction::CreateChat {
                chat_id: field(CHAT_ID),
                login: field(LOGIN),
            },
            "list_chats" => ClientAction::ListChats,
            "list_user_chats" => ClientAction::ListUserChats {
                login: field(LOGIN),
            },
            "join_chat" => ClientAction::JoinChat {
                chat_id: field(CHAT_ID),
            },
            "send_message" => ClientAction::SendMessage {
                chat_id: field(CHAT_ID),
                // The whole frame is persisted, not only message and role.
                record: message.0.clone().into_iter().collect(),
            },
            "close_chat" => ClientAction::CloseChat {
                chat_id: field(CHAT_ID),
            },
            other => ClientAction::Unknown(other.to_string()),
        }
    }
}
