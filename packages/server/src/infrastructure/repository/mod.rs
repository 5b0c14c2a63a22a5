//! Repository implementations.
//!
//! - `inmemory`: registry, user index and a volatile history store
//! - `file`: append-only history logs on disk

pub mod file;
pub mod inmemory;

pub use file::FileHistoryStore;
pub use inmemory::{InMemoryHistoryStore, InMemoryRoomRegistry, InMemoryUserChatIndex};
