//! Connection state, events and payload encoding.
//!
//! Nothing in here touches the network. The transport layer drives these
//! types; the client exposes them.
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `event` | [`SocketEvent`] and the three handler slots |
//! | `payload` | JSON text encoding for outbound frames |
//! | `state` | [`ReadyState`] lifecycle |

// ============================================================================
// Submodules
// ============================================================================

/// Lifecycle events and handler slots.
pub mod event;

/// Outbound payload encoding.
pub mod payload;

/// Connection lifecycle state.
pub mod state;

// ============================================================================
// Re-exports
// ============================================================================

pub use event::{CloseHandler, EventHandlers, MessageHandler, OpenHandler, SocketEvent};
pub use payload::encode_json;
pub use state::ReadyState;
