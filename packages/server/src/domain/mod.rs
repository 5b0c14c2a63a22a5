//! Domain layer: rooms, members, history records and the seams the use cases
//! depend on.

pub mod connection;
pub mod entity;
pub mod error;
pub mod message;
pub mod notifier;
pub mod repository;
pub mod room;
pub mod value_object;

pub use connection::{Connection, MemberHandle};
pub use entity::HistoryRecord;
pub use error::{ConnectionError, HistoryError, ValueObjectError};
pub use message::{ChatBroadcast, Reply};
pub use notifier::{AdminEvent, AdminNotifier};
pub use repository::{HistoryStore, RoomRegistry, UserChatIndex};
pub use room::{BroadcastReport, Room, RoomSnapshot, SharedRoom};
pub use value_object::{ConnectionId, Login, RoomId, Timestamp};
