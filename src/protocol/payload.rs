//! Outbound payload encoding.
//!
//! Frames are opaque UTF-8 text. The only encoding this crate performs is
//! turning a serializable value into its compact JSON text.

// ============================================================================
// Imports
// ============================================================================

use serde::Serialize;
use serde_json::to_string;

use crate::error::Result;

// ============================================================================
// Functions
// ============================================================================

/// Encodes `value` as compact JSON text.
///
/// # Errors
///
/// Returns [`Error::Json`](crate::Error::Json) if `value` has no JSON
/// representation, such as a map keyed by non-string values.
#[inline]
pub fn encode_json<T>(value: &T) -> Result<String>
where
    T: Serialize + ?Sized,
{
    Ok(to_string(value)?)
}

// ============================================================================
// Tests
// ============================================================================
