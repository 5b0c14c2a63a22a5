//! Data Transfer Objects (DTOs) for the relay.
//!
//! DTOs are organized by protocol:
//! - `websocket`: inbound WebSocket frames and their decoded actions
//! - `http`: HTTP API response DTOs

pub mod conversion;
pub mod http;
pub mod websocket;
