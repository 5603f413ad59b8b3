//! Opaque hardware counter handle.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a hardware counter slot.
///
/// Handles are allocated by the hardware layer; the control plane treats
/// them as opaque and only uses them to address add/remove intents.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct CounterId(pub u64);

impl fmt::Display for CounterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
