//! Domain logic for client-side operations.
//!
//! This module contains pure functions that turn input lines into protocol
//! frames and decide how to react to connection errors, without side effects.

use serde_json::{Value, json};

use crate::error::ClientError;

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Create(String),
    Join(String),
    List,
    Mine,
    Close(Option<String>),
    Help,
    Quit,
    /// Any line that is not a command is a chat message.
    Send(String),
    /// A command with missing or extra arguments; carries the usage text.
    Invalid(&'static str),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if !line.starts_with('/') {
            return Command::Send(line.to_string());
        }

        let mut parts = line.split_whitespace();
        let name = parts.next().unwrap_or_default();
        let argument = parts.next().map(str::to_string);
        let extra = parts.next().is_some();

        match (name, argument, extra) {
            ("/create", Some(id), false) => Command::Create(id),
            ("/create", _, _) => Command::Invalid("usage: /create <room>"),
            ("/join", Some(id), false) => Command::Join(id),
            ("/join", _, _) => Command::Invalid("usage: /join <room>"),
            ("/list", None, _) => Command::List,
            ("/mine", None, _) => Command::Mine,
            ("/close", id, false) => Command::Close(id),
            ("/help", None, _) => Command::Help,
            ("/quit", None, _) => Command::Quit,
            ("/list" | "/mine" | "/help" | "/quit", Some(_), _) => {
                Command::Invalid("this command takes no argument")
            }
            _ => Command::Invalid("unknown command, type /help"),
        }
    }
}

/// What the client remembers across reconnects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatState {
    pub login: Option<String>,
    pub role: String,
    pub current_room: Option<String>,
}

impl ChatState {
    pub fn new(login: Option<String>, role: String) -> Self {
        Self {
            login,
            role,
            current_room: None,
        }
    }

    /// Build the frame for `command`, updating the current room.
    ///
    /// Returns a notice for the user when the command cannot be sent.
    pub fn frame_for(&mut self, command: &Command) -> Result<Value, String> {
        match command {
            Command::Create(room) => {
                self.current_room = Some(room.clone());
                let mut frame = json!({"action": "create_chat", "chat_id": room});
                if let Some(login) = &self.login {
                    frame["login"] = json!(login);
                }
                Ok(frame)
            }
            Command::Join(room) => {
                self.current_room = Some(room.clone());
                Ok(json!({"action": "join_chat", "chat_id": room}))
            }
            Command::List => Ok(json!({"action": "list_chats"})),
            Command::Mine => match &self.login {
                Some(login) => Ok(json!({"action": "list_user_chats", "login": login})),
                None => Err("start the client with --login to list your rooms".to_string()),
            },
            Command::Close(room) => {
                let Some(room) = room.clone().or_else(|| self.current_room.clone()) else {
                    return Err("no room to close".to_string());
                };
                if self.current_room.as_ref() == Some(&room) {
                    self.current_room = None;
                }
                Ok(json!({"action": "close_chat", "chat_id": room}))
            }
            Command::Send(message) => match &self.current_room {
                Some(room) => Ok(json!({
                    "action": "send_message",
                    "chat_id": room,
                    "message": message,
                    "role": self.role,
                })),
                None => Err("join or create a room first".to_string()),
            },
            Command::Invalid(usage) => Err(usage.to_string()),
            Command::Help | Command::Quit => Err(format!("{:?} is handled locally", command)),
        }
    }

    /// Frame that puts a fresh connection back into the current room.
    pub fn rejoin_frame(&self) -> Option<Value> {
        self.current_room
            .as_ref()
            .map(|room| json!({"action": "join_chat", "chat_id": room}))
    }
}

/// Check if the client should exit immediately based on the error type.
pub fn should_exit_immediately(error: &ClientError) -> bool {
    matches!(error, ClientError::InvalidUrl { .. })
}

/// Check if the client should attempt to reconnect.
///
/// # Arguments
///
/// * `error` - The client error that occurred
/// * `current_attempt` - The current reconnection attempt count (0-indexed)
/// * `max_attempts` - The maximum number of reconnection attempts allowed
pub fn should_attempt_reconnect(
    error: &ClientError,
    current_attempt: u32,
    max_attempts: u32,
) -> bool {
    if should_exit_immediately(error) {
        return false;
    }

    current_attempt < max_attempts
}
