//! VLAN identifier with range validation.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ParseError;

/// An IEEE 802.1Q VLAN identifier, restricted to the usable range 1-4094.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "u16", into = "u16")]
pub struct VlanId(u16);

impl VlanId {
    /// Lowest usable VLAN ID.
    pub const MIN: u16 = 1;
    /// Highest usable VLAN ID (4095 is reserved).
    pub const MAX: u16 = 4094;

    /// Creates a VLAN ID, rejecting values outside 1-4094.
    pub fn new(id: u16) -> Result<Self, ParseError> {
        if (Self::MIN..=Self::MAX).contains(&id) {
            Ok(VlanId(id))
        } else {
            Err(ParseError::InvalidVlanId(id))
        }
    }

    /// Returns the raw numeric identifier.
    pub const fn as_u16(&self) -> u16 {
        self.0
    }
}

impl fmt::Display for VlanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u16> for VlanId {
    type Error = ParseError;

    fn try_from(id: u16) -> Result<Self, Self::Error> {
        VlanId::new(id)
    }
}

impl From<VlanId> for u16 {
    fn from(id: VlanId) -> u16 {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_usable_range() {
        assert_eq!(VlanId::new(1).unwrap().as_u16(), 1);
        assert_eq!(VlanId::new(4094).unwrap().as_u16(), 4094);
    }

    #[test]
    fn test_rejects_reserved_values() {
        assert!(VlanId::new(0).is_err());
        assert!(VlanId::new(4095).is_err());
    }
}
