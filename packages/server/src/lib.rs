//! Roomcast server: room registry, broadcast engine and chat history.

pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
