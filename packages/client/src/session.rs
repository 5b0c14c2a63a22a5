//! WebSocket client session management.

use futures_util::{SinkExt, StreamExt};
use serde_json::Value;
use tokio::sync::mpsc;
use tokio_tungstenite::{
    connect_async,
    tungstenite::{self, protocol::Message},
};

use crate::{
    domain::{ChatState, Command},
    error::ClientError,
};

use super::{formatter::MessageFormatter, ui::redisplay_prompt};

fn connect_error(url: &str, error: tungstenite::Error) -> ClientError {
    match error {
        tungstenite::Error::Url(e) => ClientError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        },
        e => ClientError::ConnectionError(e.to_string()),
    }
}

/// Run one connection until the user quits or the connection is lost.
///
/// Input lines come from `input_rx`, which outlives the session so that a
/// reconnect keeps reading from the same terminal. When the input side ends
/// (Ctrl+C, Ctrl+D or `/quit`) the session ends normally.
pub async fn run_client_session(
    url: &str,
    state: &mut ChatState,
    input_rx: &mut mpsc::UnboundedReceiver<String>,
    prompt: &str,
) -> Result<(), ClientError> {
    let (ws_stream, _) = connect_async(url)
        .await
        .map_err(|e| connect_error(url, e))?;

    tracing::info!("Connected to chat server!");
    println!("\nType /help for commands. Press Ctrl+C to exit.\n");

    let (mut write, mut read) = ws_stream.split();

    let text_frame = |frame: Value| Message::Text(frame.to_string().into());

    if let Some(frame) = state.rejoin_frame() {
        tracing::info!(
            "Rejoining room '{}'",
            frame["chat_id"].as_str().unwrap_or_default()
        );
        write
            .send(text_frame(frame))
            .await
            .map_err(|e| ClientError::ConnectionError(e.to_string()))?;
    }

    loop {
        tokio::select! {
            message = read.next() => match message {
                Some(Ok(Message::Text(text))) => {
                    print!("{}", MessageFormatter::format_incoming(text.as_str()));
                    redisplay_prompt(prompt);
                }
                Some(Ok(Message::Binary(data))) => {
                    print!("{}", MessageFormatter::format_binary_message(data.len()));
                    redisplay_prompt(prompt);
                }
                Some(Ok(Message::Close(_))) | None => {
                    tracing::info!("Server closed the connection");
                    return Err(ClientError::ConnectionError("Connection lost".to_string()));
                }
                Some(Err(e)) => {
                    tracing::warn!("WebSocket read error: {}", e);
                    return Err(ClientError::ConnectionError(e.to_string()));
                }
                Some(Ok(_)) => {}
            },
            line = input_rx.recv() => {
                let Some(line) = line else {
                    write.send(Message::Close(None)).await.ok();
                    return Ok(());
                };
                let frame = match Command::parse(&line) {
                    Command::Quit => {
                        write.send(Message::Close(None)).await.ok();
                        return Ok(());
                    }
                    Command::Help => {
                        print!("{}", MessageFormatter::format_help());
                        redisplay_prompt(prompt);
                        continue;
                    }
                    command => state.frame_for(&command),
                };
                match frame {
                    Ok(frame) => {
                        if let Err(e) = write.send(text_frame(frame)).await {
                            tracing::warn!("Failed to send message: {}", e);
                            return Err(ClientError::ConnectionError(e.to_string()));
                        }
                    }
                    Err(notice) => {
                        print!("{}", MessageFormatter::format_notice(&notice));
                        redisplay_prompt(prompt);
                    }
                }
            }
        }
    }
}
