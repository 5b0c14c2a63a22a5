//! WebSocket-backed member connection.
//!
//! The socket itself lives in the UI layer (`ui/handler/websocket.rs`). This
//! handle only owns the sending half of the connection's bounded outbound
//! queue and the shutdown token shared with the session and pusher tasks.

use tokio::sync::mpsc::{self, error::TrySendError};
use tokio_util::sync::CancellationToken;

use crate::domain::{Connection, ConnectionError, ConnectionId};

pub struct WebSocketConnection {
    id: ConnectionId,
    sender: mpsc::Sender<String>,
    shutdown: CancellationToken,
}

impl WebSocketConnection {
    /// Create a connection handle and the receiver the pusher task drains.
    pub fn channel(buffer: usize) -> (Self, mpsc::Receiver<String>) {
        let (sender, receiver) = mpsc::channel(buffer.max(1));
        let connection = Self {
            id: ConnectionId::generate(),
            sender,
            shutdown: CancellationToken::new(),
        };
        (connection, receiver)
    }

    /// Token cancelled when the connection is closed from any side.
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    pub fn is_closed(&self) -> bool {
        self.shutdown.is_cancelled()
    }
}

impl Connection for WebSocketConnection {
    fn id(&self) -> ConnectionId {
        self.id
    }

    fn send(&self, payload: &str) -> Result<(), ConnectionError> {
        if self.is_closed() {
            return Err(ConnectionError::Closed(self.id));
        }
        self.sender
            .try_send(payload.to_string())
            .map_err(|e| match e {
                TrySendError::Full(_) => ConnectionError::Backpressure(self.id),
                TrySendError::Closed(_) => ConnectionError::Closed(self.id),
            })?;
        tracing::debug!("Queued payload for connection {}", self.id);
        Ok(())
    }

    fn close(&self) {
        if !self.shutdown.is_cancelled() {
            tracing::debug!("Closing connection {}", self.id);
            self.shutdown.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_send_queues_payload() {
        // checks: send queues payload
        // given (precondition):
        let (connection, mut rx) = WebSocketConnection::channel(4);

        // when (operation):
        let result = connection.send("hello");

        // then (expected result):
        assert!(result.is_ok());
        assert_eq!(rx.recv().await, Some("hello".to_string()));
    }

    #[tokio::test]
    async fn test_send_fails_fast_when_queue_is_full() {
        // checks: send fails fast when queue is full
        // given (precondition): a consumer that never drains
        let (connection, _rx) = WebSocketConnection::channel(1);
        connection.send("first").unwrap();

        // when (operation):
        let result = connection.send("second");

        // then (expected result):
        assert_eq!(result, Err(ConnectionError::Backpressure(connection.id())));
    }

    #[tokio::test]
    async fn test_send_fails_when_receiver_is_gone() {
        // checks: send fails when receiver is gone
        // given (precondition):
        let (connection, rx) = WebSocketConnection::channel(4);
        drop(rx);

        // when (operation):
        let result = connection.send("hello");

        // then (expected result):
        assert_eq!(result, Err(ConnectionError::Closed(connection.id())));
    }

    #[tokio::test]
    async fn test_close_cancels_token_and_rejects_sends() {
        // checks: close cancels token and rejects sends
        // given (precondition):
        let (connection, _rx) = WebSocketConnection::channel(4);
        let token = connection.shutdown_token();

        // when (operation):
        connection.close();
        connection.close();

        // then (expected result):
        assert!(token.is_cancelled());
        assert!(connection.is_closed());
        assert_eq!(
            connection.send("late"),
            Err(ConnectionError::Closed(connection.id()))
        );
    }
}
