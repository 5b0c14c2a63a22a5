//! Message formatting utilities for client display.

use roomcast_server::domain::{ChatBroadcast, HistoryRecord, Reply, RoomId};

const RULE: &str = "============================================================";
const THIN_RULE: &str = "------------------------------------------------------------";

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format an incoming text frame: a reply, a broadcast, or anything else
    /// shown raw.
    pub fn format_incoming(text: &str) -> String {
        if let Ok(reply) = serde_json::from_str::<Reply>(text) {
            return match reply {
                Reply::ChatHistory { history } => Self::format_history(&history),
                Reply::ListChats { chats } => Self::format_room_list("Rooms", &chats),
                Reply::ListUserChats { chats } => Self::format_room_list("Your rooms", &chats),
            };
        }
        if let Ok(broadcast) = serde_json::from_str::<ChatBroadcast>(text) {
            return Self::format_broadcast(&broadcast);
        }
        Self::format_raw_message(text)
    }

    /// Format the history replayed on create/join
    pub fn format_history(history: &[HistoryRecord]) -> String {
        let mut output = String::new();
        output.push_str(&format!("\n\n{}\nHistory:\n", RULE));

        if history.is_empty() {
            output.push_str("(No messages yet)\n");
        } else {
            for record in history {
                output.push_str(&format!(
                    "@{}: {}\n",
                    record.role().unwrap_or("anonymous"),
                    record.message()
                ));
            }
        }

        output.push_str(RULE);
        output.push('\n');
        output
    }

    /// Format a list of room ids under `title`
    pub fn format_room_list(title: &str, rooms: &[RoomId]) -> String {
        let mut output = format!("\n{}:\n", title);
        if rooms.is_empty() {
            output.push_str("(No rooms)\n");
        }
        for room in rooms {
            output.push_str(&format!("  - {}\n", room));
        }
        output
    }

    /// Format a chat message broadcast to the room
    pub fn format_broadcast(broadcast: &ChatBroadcast) -> String {
        format!(
            "\n\n{}\n@{}: {}\n{}\n",
            THIN_RULE,
            broadcast.role.as_deref().unwrap_or("anonymous"),
            broadcast.message,
            THIN_RULE
        )
    }

    /// Format a local notice (usage errors and the like)
    pub fn format_notice(notice: &str) -> String {
        format!("! {}\n", notice)
    }

    pub fn format_help() -> String {
        [
            "Commands:",
            "  /create <room>   create a room (or join it as creator) and enter it",
            "  /join <room>     join an existing room and enter it",
            "  /list            list every open room",
            "  /mine            list the rooms you created (needs --login)",
            "  /close [room]    close a room for everyone (default: current room)",
            "  /help            show this help",
            "  /quit            leave the client",
            "Any other line is sent to the current room.",
            "",
        ]
        .join("\n")
    }

    /// Format a binary message notification
    pub fn format_binary_message(byte_count: usize) -> String {
        format!("\n← Received {} bytes of binary data\n", byte_count)
    }

    /// Format a raw text message (when parsing fails)
    pub fn format_raw_message(text: &str) -> String {
        format!("\n← Received: {}\n", text)
    }
}
