//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, SplitStream, StreamExt},
};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::{
    domain::Connection,
    infrastructure::{
        connection::WebSocketConnection,
        dto::websocket::{ClientAction, InboundMessage},
    },
    ui::{
        dispatcher::{Session, dispatch},
        state::AppState,
    },
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that drains the connection's outbound queue into the socket.
///
/// Messages already queued are written before the close frame once the
/// connection is shut down. A failed write closes the connection.
fn pusher_loop(
    mut rx: mpsc::Receiver<String>,
    mut sender: SplitSink<WebSocket, Message>,
    connection: Arc<WebSocketConnection>,
) -> tokio::task::JoinHandle<()> {
    let shutdown = connection.shutdown_token();
    tokio::spawn(async move {
        loop {
            tokio::select! {
                biased;
                message = rx.recv() => {
                    let Some(message) = message else {
                        break;
                    };
                    if let Err(e) = sender.send(Message::Text(message.into())).await {
                        tracing::debug!("Write to connection {} failed: {}", connection.id(), e);
                        connection.close();
                        return;
                    }
                }
                _ = shutdown.cancelled() => break,
            }
        }

        if let Err(e) = sender.send(Message::Close(None)).await {
            tracing::debug!("Close frame to connection {} failed: {}", connection.id(), e);
        }
    })
}

/// Read frames until the peer leaves, a frame is malformed, or the
/// connection is closed from our side.
async fn session_loop(
    state: &AppState,
    session: &mut Session,
    mut receiver: SplitStream<WebSocket>,
    shutdown: CancellationToken,
) {
    let connection_id = session.connection_id();
    loop {
        let frame = tokio::select! {
            _ = shutdown.cancelled() => {
                tracing::debug!("Connection {} closed by the server", connection_id);
                break;
            }
            frame = receiver.next() => frame,
        };

        let message = match frame {
            Some(Ok(message)) => message,
            Some(Err(e)) => {
                tracing::warn!("WebSocket error on connection {}: {}", connection_id, e);
                break;
            }
            None => break,
        };

        let inbound = match &message {
            Message::Text(text) => InboundMessage::decode(text.as_str()),
            Message::Binary(bytes) => match std::str::from_utf8(bytes) {
                Ok(text) => InboundMessage::decode(text),
                Err(e) => {
                    tracing::warn!("Non UTF-8 frame from connection {}: {}", connection_id, e);
                    break;
                }
            },
            Message::Ping(_) | Message::Pong(_) => continue,
            Message::Close(_) => {
                tracing::info!("Connection {} requested close", connection_id);
                break;
            }
        };

        match inbound {
            Ok(inbound) => dispatch(state, session, ClientAction::from(inbound)).await,
            Err(e) => {
                tracing::warn!("Malformed frame from connection {}: {}", connection_id, e);
                break;
            }
        }
    }
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (sender, receiver) = socket.split();
    let (connection, rx) = WebSocketConnection::channel(state.outbound_buffer);
    let connection = Arc::new(connection);
    let connection_id = connection.id();
    tracing::info!("Connection {} opened", connection_id);

    let pusher = pusher_loop(rx, sender, connection.clone());
    let mut session = Session::new(connection.clone());
    session_loop(&state, &mut session, receiver, connection.shutdown_token()).await;

    // Disconnect cleanup: leave every room joined during this session.
    connection.close();
    let left = state
        .leave_rooms_usecase
        .execute(connection_id, session.into_joined_rooms())
        .await;
    if let Err(e) = pusher.await {
        tracing::warn!("Pusher task of connection {} failed: {}", connection_id, e);
    }
    tracing::info!("Connection {} closed, left {} room(s)", connection_id, left);
}
