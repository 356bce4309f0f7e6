//! Debug socket client module.
//!
//! # Components
//!
//! | Type | Description |
//! |------|-------------|
//! | [`DebugSocketClient`] | Owner of the single connection |
//! | [`ClientBuilder`] | Endpoint override and handler registration |
//!
//! # Example
//!
//! ```no_run
//! use ws_debug_client::{DebugSocketClient, Result};
//!
//! # async fn example() -> Result<()> {
//! let client = DebugSocketClient::connect();
//! client.opened().await?;
//!
//! client.send_text("hello")?;
//! client.send_json(&serde_json::json!({ "a": 1 }))?;
//! client.close();
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Submodules
// ============================================================================

/// Fluent builder pattern for client configuration.
pub mod builder;

/// Core client implementation.
pub mod core;

// ============================================================================
// Re-exports
// ============================================================================

pub use builder::ClientBuilder;
pub use self::core::{DEFAULT_URL, DebugSocketClient};
