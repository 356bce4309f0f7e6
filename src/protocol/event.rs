//! Lifecycle events and the handler slots they are delivered to.
//!
//! A connection produces exactly three kinds of event:
//!
//! | Event | Fired | Default log line |
//! |-------|-------|------------------|
//! | [`SocketEvent::Open`] | once, after the handshake | `Socket opened` |
//! | [`SocketEvent::Message`] | per inbound text frame | `Server: <text>` |
//! | [`SocketEvent::Close`] | once, on any termination | `Socket closed` |
//!
//! Close carries no reason. A refused connection, a remote close frame and
//! a local [`close`](crate::DebugSocketClient::close) all look the same.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;

use tracing::info;

// ============================================================================
// Types
// ============================================================================

/// Callback for the open slot.
pub type OpenHandler = Arc<dyn Fn() + Send + Sync>;

/// Callback for the message slot. Receives the raw frame text.
pub type MessageHandler = Arc<dyn Fn(&str) + Send + Sync>;

/// Callback for the close slot.
pub type CloseHandler = Arc<dyn Fn() + Send + Sync>;

// ============================================================================
// SocketEvent
// ============================================================================

/// Something that happened on the connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SocketEvent {
    /// Handshake completed.
    Open,
    /// Text frame received from the server.
    Message(String),
    /// Connection terminated.
    Close,
}

impl fmt::Display for SocketEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open => f.write_str("Socket opened"),
            Self::Message(text) => write!(f, "Server: {text}"),
            Self::Close => f.write_str("Socket closed"),
        }
    }
}

// ============================================================================
// EventHandlers
// ============================================================================

/// The three named event slots: open, message and close.
///
/// Every slot starts out with a handler that logs the event's fixed line at
/// `info` level. Replacing a slot drops the logging for that event.
///
/// Cloning is cheap and yields a snapshot of the current slots, which is
/// what the event loop invokes, so a handler may replace slots freely.
#[derive(Clone)]
pub struct EventHandlers {
    on_open: OpenHandler,
    on_message: MessageHandler,
    on_close: CloseHandler,
}

impl Default for EventHandlers {
    fn default() -> Self {
        Self {
            on_open: Arc::new(|| log_event(&SocketEvent::Open)),
            on_message: Arc::new(|text: &str| {
                log_event(&SocketEvent::Message(text.to_owned()));
            }),
            on_close: Arc::new(|| log_event(&SocketEvent::Close)),
        }
    }
}

impl fmt::Debug for EventHandlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventHandlers").finish_non_exhaustive()
    }
}

impl EventHandlers {
    /// Creates slots populated with the logging handlers.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the open slot.
    pub fn set_on_open(&mut self, handler: OpenHandler) {
        self.on_open = handler;
    }

    /// Replaces the message slot.
    pub fn set_on_message(&mut self, handler: MessageHandler) {
        self.on_message = handler;
    }

    /// Replaces the close slot.
    pub fn set_on_close(&mut self, handler: CloseHandler) {
        self.on_close = handler;
    }

    /// Invokes the slot matching `event`.
    pub fn dispatch(&self, event: &SocketEvent) {
        match event {
            SocketEvent::Open => (self.on_open)(),
            SocketEvent::Message(text) => (self.on_message)(text),
            SocketEvent::Close => (self.on_close)(),
        }
    }
}

/// Logs the fixed line for an event.
fn log_event(event: &SocketEvent) {
    info!("{event}");
}

// ============================================================================
// Tests
// ============================================================================
