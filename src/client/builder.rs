//! Builder pattern for client configuration.
//!
//! Provides a fluent API for registering event handlers before the
//! connection starts, so not even the open event can be missed.
//!
//! # Example
//!
//! ```no_run
//! use ws_debug_client::DebugSocketClient;
//!
//! # async fn example() -> ws_debug_client::Result<()> {
//! let client = DebugSocketClient::builder()
//!     .on_message(|text| println!("<- {text}"))
//!     .connect()?;
//!
//! client.opened().await?;
//! client.send_text("hello")?;
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;

use url::Url;

use crate::error::{Error, Result};
use crate::protocol::EventHandlers;

use super::core::{DEFAULT_URL, DebugSocketClient};

// ============================================================================
// ClientBuilder
// ============================================================================

/// Builder for configuring a [`DebugSocketClient`].
///
/// Use [`DebugSocketClient::builder()`] to create a new builder.
#[derive(Debug, Default)]
pub struct ClientBuilder {
    /// Endpoint override.
    url: Option<String>,
    /// Event slots, logging by default.
    handlers: EventHandlers,
}

// ============================================================================
// ClientBuilder Implementation
// ============================================================================

impl ClientBuilder {
    /// Creates a builder targeting the default endpoint with logging handlers.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the endpoint.
    ///
    /// # Arguments
    ///
    /// * `url` - `ws://` URL (e.g., "ws://127.0.0.1:9000/ws")
    #[inline]
    #[must_use]
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Sets the open slot.
    #[must_use]
    pub fn on_open<F>(mut self, handler: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.handlers.set_on_open(Arc::new(handler));
        self
    }

    /// Sets the message slot.
    #[must_use]
    pub fn on_message<F>(mut self, handler: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.handlers.set_on_message(Arc::new(handler));
        self
    }

    /// Sets the close slot.
    #[must_use]
    pub fn on_close<F>(mut self, handler: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.handlers.set_on_close(Arc::new(handler));
        self
    }

    /// Validates the endpoint and starts connecting.
    ///
    /// Connection failures are not reported here; they surface as a close
    /// event. Must be called from within a tokio runtime.
    ///
    /// # Errors
    ///
    /// [`Error::Config`] if the endpoint is not a `ws://` URL with a host.
    pub fn connect(self) -> Result<DebugSocketClient> {
        let url = self.validate_url()?;

        Ok(DebugSocketClient::open(url, self.handlers))
    }
}

// ============================================================================
// Validation
// ============================================================================

impl ClientBuilder {
    /// Validates the endpoint configuration.
    fn validate_url(&self) -> Result<String> {
        let Some(raw) = self.url.as_deref() else {
            return Ok(DEFAULT_URL.to_string());
        };

        let parsed = Url::parse(raw)
            .map_err(|e| Error::config(format!("Invalid endpoint URL '{raw}': {e}")))?;

        if parsed.scheme() != "ws" {
            return Err(Error::config(format!(
                "Unsupported scheme '{}' in '{raw}'. Only ws:// endpoints are supported.",
                parsed.scheme()
            )));
        }

        if parsed.host_str().is_none_or(str::is_empty) {
            return Err(Error::config(format!("Endpoint URL '{raw}' has no host")));
        }

        Ok(raw.to_string())
    }
}

// ============================================================================
// Tests
// ============================================================================
