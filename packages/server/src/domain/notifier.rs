//! Admin notification hook.

use std::fmt;

use super::value_object::RoomId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminEvent {
    NewChat,
    ChatClosed,
}

impl AdminEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdminEvent::NewChat => "new_chat",
            AdminEvent::ChatClosed => "chat_closed",
        }
    }
}

impl fmt::Display for AdminEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fire-and-forget notification towards operators.
#[cfg_attr(test, mockall::automock)]
pub trait AdminNotifier: Send + Sync {
    fn notify(&self, event: AdminEvent, room_id: &RoomId);
}
