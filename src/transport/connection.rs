//! WebSocket connection and event loop.
//!
//! # Event Loop
//!
//! [`Connection::open`] spawns a tokio task that owns the socket for its
//! whole life:
//!
//! 1. Performs the client handshake (abandoned if a shutdown arrives first)
//! 2. Publishes [`ReadyState::Open`] and fires the open slot
//! 3. Forwards queued text frames and fires the message slot per inbound
//!    text frame, in arrival order
//! 4. On shutdown, remote close, stream end or any transport error,
//!    publishes [`ReadyState::Closed`] and fires the close slot once
//!
//! The slots are only ever invoked from this task, so they never overlap.

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;

use futures_util::stream::SplitSink;
use futures_util::{SinkExt, StreamExt};
use parking_lot::Mutex;
use tokio::net::TcpStream;
use tokio::sync::{mpsc, watch};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tracing::{debug, trace, warn};

use crate::error::{Error, Result};
use crate::protocol::{EventHandlers, ReadyState, SocketEvent};

// ============================================================================
// Types
// ============================================================================

/// Socket type produced by the client handshake.
type ClientStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Write half of the socket.
type ClientSink = SplitSink<ClientStream, Message>;

/// Handler slots shared between the owner and the event loop.
type SharedHandlers = Arc<Mutex<EventHandlers>>;

// ============================================================================
// ConnectionCommand
// ============================================================================

/// Internal commands for the event loop.
enum ConnectionCommand {
    /// Transmit one text frame.
    Send(String),
    /// Close the connection.
    Shutdown,
}

// ============================================================================
// Connection
// ============================================================================

/// Handle to a single WebSocket connection driven by a background task.
///
/// All operations are non-blocking. Sends are fire-and-forget: once a frame
/// is queued there is no acknowledgement and no error if the transport
/// dies before writing it.
pub struct Connection {
    /// Endpoint the connection was opened against.
    url: String,
    /// Channel for sending commands to the event loop.
    command_tx: mpsc::UnboundedSender<ConnectionCommand>,
    /// Lifecycle state published by the event loop.
    state_rx: watch::Receiver<ReadyState>,
    /// Handler slots (shared with event loop).
    handlers: SharedHandlers,
}

impl Connection {
    /// Starts connecting to `url` and returns immediately.
    ///
    /// Never fails here. A failed handshake shows up as a close event.
    /// Must be called from within a tokio runtime.
    pub(crate) fn open(url: impl Into<String>, handlers: EventHandlers) -> Self {
        let url = url.into();
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = watch::channel(ReadyState::Connecting);
        let handlers = Arc::new(Mutex::new(handlers));

        tokio::spawn(Self::run_event_loop(
            url.clone(),
            command_rx,
            state_tx,
            Arc::clone(&handlers),
        ));

        Self {
            url,
            command_tx,
            state_rx,
            handlers,
        }
    }

    /// Returns the endpoint URL.
    #[inline]
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the current lifecycle state.
    #[inline]
    #[must_use]
    pub fn state(&self) -> ReadyState {
        *self.state_rx.borrow()
    }

    /// Queues one text frame.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidState`] if the connection is not open. Nothing is
    /// queued in that case.
    pub fn send(&self, text: String) -> Result<()> {
        let state = self.state();
        if !state.is_open() {
            return Err(Error::invalid_state(state));
        }

        self.command_tx
            .send(ConnectionCommand::Send(text))
            .map_err(|_| Error::invalid_state(ReadyState::Closed))
    }

    /// Requests the connection to close. No-op once closed.
    pub fn shutdown(&self) {
        let _ = self.command_tx.send(ConnectionCommand::Shutdown);
    }

    /// Runs `f` with exclusive access to the handler slots.
    ///
    /// Safe to call from inside a handler; the change applies from the next
    /// event on.
    pub fn with_handlers<R>(&self, f: impl FnOnce(&mut EventHandlers) -> R) -> R {
        f(&mut self.handlers.lock())
    }

    /// Waits until the connection leaves [`ReadyState::Connecting`].
    ///
    /// Returns the state it settled in.
    pub async fn settled(&self) -> ReadyState {
        self.wait_for(|state| state != ReadyState::Connecting).await
    }

    /// Waits until the connection is closed.
    pub async fn closed(&self) {
        self.wait_for(ReadyState::is_closed).await;
    }

    /// Waits until `predicate` holds for the published state.
    async fn wait_for(&self, predicate: impl Fn(ReadyState) -> bool) -> ReadyState {
        let mut state_rx = self.state_rx.clone();
        match state_rx.wait_for(|state| predicate(*state)).await {
            Ok(state) => *state,
            // Event loop is gone, so the connection is closed.
            Err(_) => ReadyState::Closed,
        }
    }

    /// Event loop that owns the socket.
    async fn run_event_loop(
        url: String,
        mut command_rx: mpsc::UnboundedReceiver<ConnectionCommand>,
        state_tx: watch::Sender<ReadyState>,
        handlers: SharedHandlers,
    ) {
        let ws_stream = tokio::select! {
            result = connect_async(url.as_str()) => match result {
                Ok((ws_stream, _response)) => Some(ws_stream),
                Err(e) => {
                    debug!(url = %url, error = %Error::from(e), "Handshake failed");
                    None
                }
            },

            // Only Shutdown or a dropped owner can arrive while connecting
            _ = command_rx.recv() => {
                debug!(url = %url, "Connection abandoned before handshake");
                None
            }
        };

        if let Some(ws_stream) = ws_stream {
            debug!(url = %url, "WebSocket connection established");
            Self::publish(&state_tx, ReadyState::Open);
            Self::dispatch(&handlers, &SocketEvent::Open);

            Self::pump(ws_stream, &mut command_rx, &handlers).await;
        }

        Self::publish(&state_tx, ReadyState::Closed);
        Self::dispatch(&handlers, &SocketEvent::Close);

        debug!("Event loop terminated");
    }

    /// Moves frames in both directions until the connection ends.
    async fn pump(
        ws_stream: ClientStream,
        command_rx: &mut mpsc::UnboundedReceiver<ConnectionCommand>,
        handlers: &SharedHandlers,
    ) {
        let (mut ws_write, mut ws_read) = ws_stream.split();

        loop {
            tokio::select! {
                // Incoming frames from the server
                message = ws_read.next() => {
                    match message {
                        Some(Ok(Message::Text(text))) => {
                            let event = SocketEvent::Message(text.as_str().to_owned());
                            Self::dispatch(handlers, &event);
                        }

                        Some(Ok(Message::Close(_))) => {
                            debug!("WebSocket closed by remote");
                            break;
                        }

                        Some(Err(e)) => {
                            debug!(error = %Error::from(e), "Read failed");
                            break;
                        }

                        None => {
                            debug!("WebSocket stream ended");
                            break;
                        }

                        // Binary, Ping, Pong and raw frames are not surfaced
                        Some(Ok(other)) => {
                            trace!(len = other.len(), "Ignoring non-text frame");
                        }
                    }
                }

                // Commands from the owner
                command = command_rx.recv() => {
                    match command {
                        Some(ConnectionCommand::Send(text)) => {
                            if !Self::write_text(&mut ws_write, text).await {
                                break;
                            }
                        }

                        Some(ConnectionCommand::Shutdown) => {
                            debug!("Shutdown command received");
                            let _ = ws_write.close().await;
                            break;
                        }

                        None => {
                            debug!("Command channel closed");
                            let _ = ws_write.close().await;
                            break;
                        }
                    }
                }
            }
        }
    }

    /// Writes one text frame. Returns `false` if the socket is unusable.
    async fn write_text(ws_write: &mut ClientSink, text: String) -> bool {
        let len = text.len();

        match ws_write.send(Message::Text(text.into())).await {
            Ok(()) => {
                trace!(len, "Frame sent");
                true
            }
            Err(e) => {
                warn!(error = %Error::from(e), "Failed to send frame");
                false
            }
        }
    }

    /// Publishes a state change, ignoring illegal transitions.
    fn publish(state_tx: &watch::Sender<ReadyState>, next: ReadyState) {
        state_tx.send_if_modified(|state| {
            if state.can_transition_to(next) {
                *state = next;
                true
            } else {
                false
            }
        });
    }

    /// Invokes the slot for `event`.
    ///
    /// The slots are snapshotted first so the lock is released before any
    /// user code runs.
    fn dispatch(handlers: &SharedHandlers, event: &SocketEvent) {
        let snapshot = handlers.lock().clone();
        snapshot.dispatch(event);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use std::time::Duration;

    use tokio::net::TcpListener;
    use tokio::time::timeout;

    const WAIT: Duration = Duration::from_secs(5);

    /// Reserves a loopback port with nothing listening on it.
    async fn dead_url() -> String {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind should succeed");
        let port = listener.local_addr().expect("local addr").port();
        drop(listener);
        format!("ws://127.0.0.1:{port}/ws")
    }

    #[tokio::test]
    async fn test_starts_connecting() {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind should succeed");
        let port = listener.local_addr().expect("local addr").port();

        // Listener never answers the handshake
        let url = format!("ws://127.0.0.1:{port}/ws");
        let connection = Connection::open(url, EventHandlers::new());

        assert_eq!(connection.state(), ReadyState::Connecting);
        let err = connection.send("x".into()).expect_err("not open yet");
        assert!(matches!(
            err,
            Error::InvalidState {
                state: ReadyState::Connecting
            }
        ));
    }

    #[tokio::test]
    async fn test_refused_connection_settles_closed() {
        let connection = Connection::open(dead_url().await, EventHandlers::new());

        let state = timeout(WAIT, connection.settled())
            .await
            .expect("should settle");
        assert_eq!(state, ReadyState::Closed);
        assert!(connection.send("x".into()).unwrap_err().is_invalid_state());
    }

    #[tokio::test]
    async fn test_shutdown_while_connecting() {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind should succeed");
        let port = listener.local_addr().expect("local addr").port();

        let url = format!("ws://127.0.0.1:{port}/ws");
        let connection = Connection::open(url, EventHandlers::new());
        connection.shutdown();

        timeout(WAIT, connection.closed())
            .await
            .expect("should close");
        assert_eq!(connection.state(), ReadyState::Closed);
    }

    #[tokio::test]
    async fn test_shutdown_is_idempotent() {
        let connection = Connection::open(dead_url().await, EventHandlers::new());
        timeout(WAIT, connection.closed())
            .await
            .expect("should close");

        connection.shutdown();
        connection.shutdown();
        assert_eq!(connection.state(), ReadyState::Closed);
    }
}
