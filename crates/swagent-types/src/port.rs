//! Port identity and administrative state.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Numeric identifier of a front-panel port.
///
/// Port IDs are assigned by the platform and stay stable across
/// reconfigurations; the human-readable name lives on the port node itself.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct PortId(pub u32);

impl fmt::Display for PortId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Administratively configured state of a port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdminState {
    /// Port is administratively disabled.
    #[default]
    Down,
    /// Port is administratively enabled.
    Up,
}

impl fmt::Display for AdminState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Down => write!(f, "down"),
            Self::Up => write!(f, "up"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_id_ordering() {
        assert!(PortId(1) < PortId(2));
        assert_eq!(PortId(7).to_string(), "7");
    }

    #[test]
    fn test_admin_state_default_is_down() {
        assert_eq!(AdminState::default(), AdminState::Down);
        assert_eq!(AdminState::Up.to_string(), "up");
    }
}
