//! WebSocket debug client - one connection, three operations, plain logs.
//!
//! Opens a single WebSocket connection to `ws://127.0.0.1:8080/ws`, logs
//! what happens on it and lets you push frames at the server by hand.
//!
//! # Architecture
//!
//! - [`DebugSocketClient`] owns one [`transport::Connection`]
//! - The connection's tokio task owns the socket and fires the three event
//!   slots (open, message, close) in order, never concurrently
//! - `send_text`, `send_json` and `close` enqueue and return immediately
//!
//! There is no reconnection, no queuing while disconnected and no
//! distinction between a graceful close and a failed one.
//!
//! # Quick Start
//!
//! ```no_run
//! use ws_debug_client::{DebugSocketClient, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     // Logs "Socket opened", "Server: ..." and "Socket closed"
//!     let client = DebugSocketClient::connect();
//!     client.opened().await?;
//!
//!     client.send_text("ping")?;
//!     client.send_json(&serde_json::json!({ "a": 1 }))?;
//!
//!     client.close();
//!     client.closed().await;
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`client`] | [`DebugSocketClient`] and [`ClientBuilder`] |
//! | [`console`] | Line parser for the interactive binary |
//! | [`error`] | Error types and [`Result`] alias |
//! | [`protocol`] | Lifecycle state, events and payload encoding |
//! | [`transport`] | WebSocket event loop (internal) |

// ============================================================================
// Modules
// ============================================================================

/// The debug socket client and its builder.
pub mod client;

/// Interactive console commands.
pub mod console;

/// Error types and result aliases.
///
/// All fallible operations return [`Result<T>`] which uses [`Error`].
pub mod error;

/// Lifecycle state, events and payload encoding.
pub mod protocol;

/// WebSocket transport layer.
pub mod transport;

#[cfg(test)]
mod testing;

// ============================================================================
// Re-exports
// ============================================================================

// Client types
pub use client::{ClientBuilder, DEFAULT_URL, DebugSocketClient};

// Console types
pub use console::ConsoleCommand;

// Error types
pub use error::{Error, Result};

// Protocol types
pub use protocol::{EventHandlers, ReadyState, SocketEvent};
