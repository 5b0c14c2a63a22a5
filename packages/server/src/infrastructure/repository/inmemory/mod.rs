pub mod history;
pub mod registry;
pub mod user_chats;

pub use history::InMemoryHistoryStore;
pub use registry::InMemoryRoomRegistry;
pub use user_chats::InMemoryUserChatIndex;
