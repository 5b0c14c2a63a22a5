//! Use case layer: one struct per protocol operation.

mod close_chat;
mod create_chat;
mod error;
mod get_rooms;
mod join_chat;
mod leave_rooms;
mod list_chats;
mod send_message;

#[cfg(test)]
pub(crate) mod test_support;

pub use close_chat::CloseChatUseCase;
pub use create_chat::CreateChatUseCase;
pub use error::{
    CloseChatError, CreateChatError, GetRoomDetailError, JoinChatError, SendMessageError,
};
pub use get_rooms::{GetRoomDetailUseCase, GetRoomsUseCase};
pub use join_chat::JoinChatUseCase;
pub use leave_rooms::LeaveRoomsUseCase;
pub use list_chats::{ListChatsUseCase, ListUserChatsUseCase};
pub use send_message::{SendMessageUseCase, SendReport};
