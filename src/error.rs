//! Error types for the debug socket client.
//!
//! # Usage
//!
//! Every fallible operation returns [`Result<T>`] which uses [`Error`]:
//!
//! ```ignore
//! use ws_debug_client::{DebugSocketClient, Result};
//!
//! fn poke(client: &DebugSocketClient) -> Result<()> {
//!     client.send_text("ping")?;
//!     client.send_json(&serde_json::json!({ "a": 1 }))?;
//!     Ok(())
//! }
//! ```
//!
//! # Error Categories
//!
//! | Category | Variants |
//! |----------|----------|
//! | Configuration | [`Error::Config`] |
//! | Connection | [`Error::InvalidState`], [`Error::WebSocket`] |
//! | Console | [`Error::Console`] |
//! | External | [`Error::Io`], [`Error::Json`] |
//!
//! Transport failures ([`Error::WebSocket`]) never reach callers of the send
//! operations. The event loop logs them at `debug` level and folds them into
//! the close event, which carries no diagnostic payload.

// ============================================================================
// Imports
// ============================================================================

use std::io::Error as IoError;
use std::result::Result as StdResult;

use thiserror::Error;
use tokio_tungstenite::tungstenite::Error as WsError;

use crate::protocol::ReadyState;

// ============================================================================
// Result Alias
// ============================================================================

/// Result type alias using crate [`enum@Error`].
pub type Result<T> = StdResult<T, Error>;

// ============================================================================
// Error Enum
// ============================================================================

/// Main error type for the crate.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Configuration error.
    ///
    /// Returned when the endpoint given to the builder is unusable.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    // ========================================================================
    // Connection Errors
    // ========================================================================
    /// Send attempted while the connection is not open.
    #[error("Invalid state: connection is {state}")]
    InvalidState {
        /// State the connection was in when the send was attempted.
        state: ReadyState,
    },

    // ========================================================================
    // Console Errors
    // ========================================================================
    /// Malformed line typed into the interactive console.
    #[error("Console error: {message}")]
    Console {
        /// Description of what was wrong with the line.
        message: String,
    },

    // ========================================================================
    // External Errors
    // ========================================================================
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] IoError),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// WebSocket transport error.
    ///
    /// Handshake, read and write failures inside the event loop.
    #[error("WebSocket error: {0}")]
    WebSocket(#[from] WsError),
}

// ============================================================================
// Error Constructors
// ============================================================================

impl Error {
    /// Creates a configuration error.
    #[inline]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Creates an invalid state error.
    #[inline]
    pub fn invalid_state(state: ReadyState) -> Self {
        Self::InvalidState { state }
    }

    /// Creates a console error.
    #[inline]
    pub fn console(message: impl Into<String>) -> Self {
        Self::Console {
            message: message.into(),
        }
    }
}

// ============================================================================
// Error Predicates
// ============================================================================

impl Error {
    /// Returns `true` if a send was rejected because the socket was not open.
    #[inline]
    #[must_use]
    pub fn is_invalid_state(&self) -> bool {
        matches!(self, Self::InvalidState { .. })
    }

    /// Returns `true` if this is a serialization error.
    #[inline]
    #[must_use]
    pub fn is_serialization_error(&self) -> bool {
        matches!(self, Self::Json(_))
    }

    /// Returns `true` if this is a transport error.
    #[inline]
    #[must_use]
    pub fn is_connection_error(&self) -> bool {
        matches!(self, Self::WebSocket(_))
    }
}

// ============================================================================
// Tests
// ============================================================================
