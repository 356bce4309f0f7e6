//! Core client implementation.
//!
//! [`DebugSocketClient`] owns exactly one connection. It is constructed
//! explicitly and passed to whoever needs it; there is no process-wide
//! instance.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::protocol::{EventHandlers, ReadyState, encode_json};
use crate::transport::Connection;

use super::builder::ClientBuilder;

// ============================================================================
// Constants
// ============================================================================

/// Endpoint the client connects to unless overridden.
pub const DEFAULT_URL: &str = "ws://127.0.0.1:8080/ws";

// ============================================================================
// DebugSocketClient
// ============================================================================

/// Single WebSocket connection for poking at a debug endpoint by hand.
///
/// Lifecycle events go to three slots (open, message, close) that log by
/// default. The three operations [`send_text`](Self::send_text),
/// [`send_json`](Self::send_json) and [`close`](Self::close) never block.
///
/// Once closed the client is spent; build a new one to reconnect.
pub struct DebugSocketClient {
    connection: Connection,
}

impl fmt::Debug for DebugSocketClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DebugSocketClient")
            .field("url", &self.url())
            .field("state", &self.state())
            .finish()
    }
}

// ============================================================================
// DebugSocketClient - Construction
// ============================================================================

impl DebugSocketClient {
    /// Starts connecting to `ws://127.0.0.1:8080/ws` with logging handlers.
    ///
    /// Never fails here. If the endpoint is unreachable the close event
    /// fires later. Must be called from within a tokio runtime.
    #[must_use]
    pub fn connect() -> Self {
        Self::open(DEFAULT_URL.to_string(), EventHandlers::new())
    }

    /// Creates a builder for a client with custom handlers or endpoint.
    #[inline]
    #[must_use]
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Spawns the connection.
    pub(crate) fn open(url: String, handlers: EventHandlers) -> Self {
        debug!(url = %url, "Connecting");

        Self {
            connection: Connection::open(url, handlers),
        }
    }
}

// ============================================================================
// DebugSocketClient - Accessors
// ============================================================================

impl DebugSocketClient {
    /// Returns the endpoint URL.
    #[inline]
    #[must_use]
    pub fn url(&self) -> &str {
        self.connection.url()
    }

    /// Returns the current lifecycle state.
    #[inline]
    #[must_use]
    pub fn state(&self) -> ReadyState {
        self.connection.state()
    }
}

// ============================================================================
// DebugSocketClient - Operations
// ============================================================================

impl DebugSocketClient {
    /// Sends `message` verbatim as one text frame.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidState`] if the connection is still connecting or
    /// already closed. No frame is sent in that case.
    pub fn send_text(&self, message: impl Into<String>) -> Result<()> {
        self.connection.send(message.into())
    }

    /// Serializes `message` to JSON and sends it as one text frame.
    ///
    /// # Errors
    ///
    /// - [`Error::Json`] if `message` has no JSON representation
    /// - [`Error::InvalidState`] if the connection is not open
    pub fn send_json<T>(&self, message: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        let frame = encode_json(message)?;
        self.connection.send(frame)
    }

    /// Requests the connection to close.
    ///
    /// Harmless on a connection that is already closed.
    pub fn close(&self) {
        self.connection.shutdown();
    }
}

// ============================================================================
// DebugSocketClient - Event Slots
// ============================================================================

impl DebugSocketClient {
    /// Replaces the open slot.
    ///
    /// Events already delivered are not replayed. May be called from inside
    /// a handler; the new slot takes effect from the next event.
    pub fn set_on_open<F>(&self, handler: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.connection
            .with_handlers(|handlers| handlers.set_on_open(Arc::new(handler)));
    }

    /// Replaces the message slot.
    pub fn set_on_message<F>(&self, handler: F)
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.connection
            .with_handlers(|handlers| handlers.set_on_message(Arc::new(handler)));
    }

    /// Replaces the close slot.
    pub fn set_on_close<F>(&self, handler: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.connection
            .with_handlers(|handlers| handlers.set_on_close(Arc::new(handler)));
    }
}

// ============================================================================
// DebugSocketClient - Waiting
// ============================================================================

impl DebugSocketClient {
    /// Waits for the handshake to finish.
    ///
    /// No timeout is applied; wrap in [`tokio::time::timeout`] if needed.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidState`] if the connection closed instead of opening.
    pub async fn opened(&self) -> Result<()> {
        match self.connection.settled().await {
            ReadyState::Open => Ok(()),
            state => Err(Error::invalid_state(state)),
        }
    }

    /// Waits until the connection is closed.
    pub async fn closed(&self) {
        self.connection.closed().await;
    }
}

// ============================================================================
// Tests
// ============================================================================
