//! Terminal chat client for the Roomcast relay.

mod domain;
pub mod error;
mod formatter;
mod runner;
mod session;
mod ui;

pub use runner::{ClientConfig, run_client};
