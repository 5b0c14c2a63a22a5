//! Terminal chat client for the Roomcast relay.
//!
//! Reads lines from the terminal: `/`-commands manage rooms, any other line is
//! sent to the current room. Automatically reconnects on disconnection (max 5
//! attempts with 5 second interval) and rejoins the current room.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin roomcast-client -- --login alice
//! cargo run --bin roomcast-client -- -l bob --role moderator
//! ```

use clap::Parser;

use roomcast_client::{ClientConfig, run_client};
use roomcast_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "roomcast-client")]
#[command(about = "Terminal chat client for the Roomcast relay", long_about = None)]
struct Args {
    /// WebSocket server URL
    #[arg(short = 'u', long, default_value = "ws://127.0.0.1:8080/ws")]
    url: String,

    /// Login recorded as the creator of the rooms you create
    #[arg(short = 'l', long)]
    login: Option<String>,

    /// Role attached to every message you send
    #[arg(short = 'r', long, default_value = "user")]
    role: String,
}

#[tokio::main]
async fn main() {
    setup_logger(&[env!("CARGO_PKG_NAME")], "info");

    let args = Args::parse();
    let config = ClientConfig {
        url: args.url,
        login: args.login,
        role: args.role,
    };

    if let Err(e) = run_client(config).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
