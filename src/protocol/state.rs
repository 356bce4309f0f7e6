//! Connection lifecycle state.
//!
//! ```text
//! Connecting ──handshake──► Open ──close/error──► Closed
//!      │                                            ▲
//!      └──────────────handshake failure─────────────┘
//! ```
//!
//! `Closed` is terminal. Reconnecting means building a new client.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

// ============================================================================
// ReadyState
// ============================================================================

/// Where a connection is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ReadyState {
    /// Handshake in progress.
    #[default]
    Connecting,
    /// Handshake completed, frames may be sent.
    Open,
    /// Terminated for any reason.
    Closed,
}

impl ReadyState {
    /// Returns `true` if frames may be sent.
    #[inline]
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }

    /// Returns `true` once the connection has terminated.
    #[inline]
    #[must_use]
    pub const fn is_closed(self) -> bool {
        matches!(self, Self::Closed)
    }

    /// Returns the lowercase name of the state.
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Connecting => "connecting",
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }

    /// Returns `true` if moving from `self` to `next` is a legal transition.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Connecting, Self::Open)
                | (Self::Connecting, Self::Closed)
                | (Self::Open, Self::Closed)
        )
    }
}

impl fmt::Display for ReadyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Tests
// ============================================================================
