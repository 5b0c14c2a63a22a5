//! WebSocket chat relay: routing, sessions and HTTP API.

mod dispatcher;
mod handler;
mod server;
mod signal;
pub mod state;

pub use dispatcher::{Session, dispatch};
pub use server::Server;
