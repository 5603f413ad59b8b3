//! Error types for state tree operations.
//!
//! Reconfiguration errors are reported synchronously and abort the whole
//! attempt; the previously published root stays current. Structural
//! invariant violations (mutating a published node) are *not* represented
//! here: they are programming errors and panic instead.

use std::fmt;

use thiserror::Error;

/// Result type alias for state operations.
pub type StateResult<T> = Result<T, StateError>;

/// Errors raised while reconciling desired configuration or runtime intents
/// against the current state.
///
/// Every variant carries the offending ID so an operator can correct the
/// input that caused the rejection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    /// Two desired entries share one ID within a batch, or an insert
    /// collides with an entry that already exists.
    #[error("duplicate id: {id}")]
    DuplicateId {
        /// Human-readable identity of the colliding entity.
        id: String,
    },

    /// A removal or update targets an entity that does not exist.
    #[error("unknown id: {id}")]
    UnknownId {
        /// Human-readable identity of the missing entity.
        id: String,
    },
}

impl StateError {
    /// Creates a duplicate-ID error.
    pub fn duplicate_id(id: impl fmt::Display) -> Self {
        StateError::DuplicateId { id: id.to_string() }
    }

    /// Creates an unknown-ID error.
    pub fn unknown_id(id: impl fmt::Display) -> Self {
        StateError::UnknownId { id: id.to_string() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_carries_offending_id() {
        assert_eq!(
            StateError::duplicate_id("load balancer ECMP").to_string(),
            "duplicate id: load balancer ECMP"
        );
        assert_eq!(
            StateError::unknown_id("counter 7").to_string(),
            "unknown id: counter 7"
        );
    }
}
