//! Member connection implementations.
//!
//! - `websocket`: bounded outbound queue drained by the socket pusher task

pub mod websocket;

pub use websocket::WebSocketConnection;
