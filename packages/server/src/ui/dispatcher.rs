//! Session dispatcher: routes decoded client actions to the use cases.
//!
//! A session only remembers which rooms its connection joined, so the rooms can
//! be left when the connection goes away. Every failure here is local to the
//! session: it is logged and the session keeps reading.

use std::collections::BTreeSet;

use crate::{
    domain::{Connection, ConnectionId, Login, MemberHandle, Reply, RoomId},
    infrastructure::dto::websocket::ClientAction,
    ui::state::AppState,
    usecase::{CloseChatError, JoinChatError, SendMessageError},
};

/// Per-connection dispatcher state.
pub struct Session {
    connection: MemberHandle,
    joined: BTreeSet<RoomId>,
}

impl Session {
    pub fn new(connection: MemberHandle) -> Self {
        Self {
            connection,
            joined: BTreeSet::new(),
        }
    }

    pub fn connection_id(&self) -> ConnectionId {
        self.connection.id()
    }

    /// Rooms joined during this session, in id order.
    pub fn joined_rooms(&self) -> impl Iterator<Item = &RoomId> {
        self.joined.iter()
    }

    pub fn into_joined_rooms(self) -> BTreeSet<RoomId> {
        self.joined
    }

    /// Send a reply to this connection only. A connection that cannot take
    /// the reply is closed, which ends the session.
    fn reply(&self, reply: &Reply) {
        let payload = match reply.encode() {
            Ok(payload) => payload,
            Err(e) => {
                tracing::error!("Failed to encode reply: {}", e);
                return;
            }
        };
        if let Err(e) = self.connection.send(&payload) {
            tracing::warn!("Failed to reply: {}", e);
            self.connection.close();
        }
    }
}

fn parse_room_id(action: &str, chat_id: Option<String>) -> Option<RoomId> {
    let Some(chat_id) = chat_id else {
        tracing::debug!("Ignoring '{}' without chat_id", action);
        return None;
    };
    match RoomId::new(chat_id) {
        Ok(room_id) => Some(room_id),
        Err(e) => {
            tracing::debug!("Ignoring '{}': {}", action, e);
            None
        }
    }
}

fn parse_login(login: Option<String>) -> Option<Login> {
    match Login::new(login?) {
        Ok(login) => Some(login),
        Err(e) => {
            tracing::debug!("Ignoring login: {}", e);
            None
        }
    }
}

/// Apply one client action on behalf of `session`.
pub async fn dispatch(state: &AppState, session: &mut Session, action: ClientAction) {
    let connection_id = session.connection_id();
    tracing::debug!("Connection {} sent '{}'", connection_id, action.name());

    match action {
        ClientAction::CreateChat { chat_id, login } => {
            let Some(room_id) = parse_room_id("create_chat", chat_id) else {
                return;
            };
            let login = parse_login(login);
            session.joined.insert(room_id.clone());
            // The connection stays a member even when the history failed.
            if let Err(e) = state
                .create_chat_usecase
                .execute(session.connection.clone(), room_id.clone(), login)
                .await
            {
                tracing::error!("create_chat on '{}': {}", room_id, e);
            }
        }
        ClientAction::ListChats => {
            let chats = state.list_chats_usecase.execute().await;
            session.reply(&Reply::ListChats { chats });
        }
        ClientAction::ListUserChats { login } => {
            let chats = match parse_login(login) {
                Some(login) => state.list_user_chats_usecase.execute(&login).await,
                None => Vec::new(),
            };
            session.reply(&Reply::ListUserChats { chats });
        }
        ClientAction::JoinChat { chat_id } => {
            let Some(room_id) = parse_room_id("join_chat", chat_id) else {
                return;
            };
            match state
                .join_chat_usecase
                .execute(session.connection.clone(), room_id.clone())
                .await
            {
                Ok(()) => {
                    session.joined.insert(room_id);
                }
                Err(JoinChatError::RoomNotFound(_)) => {
                    tracing::debug!("join_chat on unknown room '{}'", room_id);
                }
                Err(e) => {
                    // The connection is a member even when history failed.
                    tracing::error!("join_chat on '{}': {}", room_id, e);
                    session.joined.insert(room_id);
                }
            }
        }
        ClientAction::SendMessage { chat_id, record } => {
            let Some(room_id) = parse_room_id("send_message", chat_id) else {
                return;
            };
            match state.send_message_usecase.execute(room_id.clone(), record).await {
                Ok(report) if !report.persisted => {
                    tracing::warn!("Message to '{}' delivered but not persisted", room_id);
                }
                Ok(_) => {}
                Err(SendMessageError::RoomNotFound(_)) => {
                    tracing::debug!("send_message on unknown room '{}'", room_id);
                }
                Err(e) => tracing::error!("send_message on '{}': {}", room_id, e),
            }
        }
        ClientAction::CloseChat { chat_id } => {
            let Some(room_id) = parse_room_id("close_chat", chat_id) else {
                return;
            };
            match state.close_chat_usecase.execute(room_id.clone()).await {
                Ok(_) => {
                    session.joined.remove(&room_id);
                }
                Err(CloseChatError::RoomNotFound(_)) => {
                    tracing::debug!("close_chat on unknown room '{}'", room_id);
                }
            }
        }
        ClientAction::Unknown(name) => {
            tracing::debug!("Ignoring unknown action '{}'", name);
        }
    }
}
