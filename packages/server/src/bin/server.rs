//! Roomcast chat relay server.
//!
//! Clients create or join named rooms over WebSocket and receive every message
//! broadcast to a room, along with the room's history.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin roomcast-server
//! cargo run --bin roomcast-server -- --host 0.0.0.0 --port 3000 --history-dir /var/lib/roomcast
//! ```

use std::{path::PathBuf, sync::Arc};

use clap::Parser;
use roomcast_server::{
    domain::HistoryStore,
    infrastructure::{
        notifier::TracingAdminNotifier,
        repository::{
            FileHistoryStore, InMemoryHistoryStore, InMemoryRoomRegistry, InMemoryUserChatIndex,
        },
    },
    ui::{
        Server,
        state::{AppState, DEFAULT_OUTBOUND_BUFFER},
    },
};
use roomcast_shared::{logger::setup_logger, time::SystemClock};

#[derive(Parser, Debug)]
#[command(name = "roomcast-server")]
#[command(about = "Chat relay with named rooms and persistent history", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, env = "ROOMCAST_HOST", default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "ROOMCAST_PORT", default_value = "8080")]
    port: u16,

    /// Directory holding one history log per room
    #[arg(long, env = "ROOMCAST_HISTORY_DIR", default_value = "history")]
    history_dir: PathBuf,

    /// Capacity of each connection's outbound queue
    #[arg(long, env = "ROOMCAST_OUTBOUND_BUFFER", default_value_t = DEFAULT_OUTBOUND_BUFFER)]
    outbound_buffer: usize,

    /// Keep history in memory only
    #[arg(long)]
    ephemeral: bool,

    /// Default log level, overridden by RUST_LOG
    #[arg(long, default_value = "debug")]
    log_level: String,
}

async fn open_history(args: &Args) -> std::io::Result<Arc<dyn HistoryStore>> {
    if args.ephemeral {
        tracing::warn!("Running with in-memory history, nothing is persisted");
        return Ok(Arc::new(InMemoryHistoryStore::new()));
    }
    Ok(Arc::new(FileHistoryStore::open(&args.history_dir).await?))
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    setup_logger(&[env!("CARGO_PKG_NAME"), "tower_http"], &args.log_level);

    // Initialize dependencies in order:
    // 1. Stores
    // 2. AppState (use cases)
    // 3. Server
    let registry = Arc::new(InMemoryRoomRegistry::new(
        Arc::new(TracingAdminNotifier),
        Arc::new(SystemClock),
    ));
    let history = match open_history(&args).await {
        Ok(history) => history,
        Err(e) => {
            tracing::error!(
                "Failed to open history directory {}: {}",
                args.history_dir.display(),
                e
            );
            std::process::exit(1);
        }
    };
    let user_chats = Arc::new(InMemoryUserChatIndex::new());

    let state = AppState::new(registry, history, user_chats, args.outbound_buffer);

    let server = Server::new(state);
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
