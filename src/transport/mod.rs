//! WebSocket transport layer.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────┐                         ┌──────────────────┐
//! │ DebugSocketClient │        WebSocket        │  Debug endpoint  │
//! │   → Connection    │◄───────────────────────►│                  │
//! │   (event loop)    │   127.0.0.1:8080/ws     │                  │
//! └───────────────────┘                         └──────────────────┘
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `connection` | WebSocket connection and event loop |

// ============================================================================
// Submodules
// ============================================================================

/// WebSocket connection and event loop.
pub mod connection;

// ============================================================================
// Re-exports
// ============================================================================

pub use connection::Connection;
