//! Load balancer identity, hash algorithm, and hash-field selections.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which forwarding application a load balancer's hash feeds.
///
/// A switch carries at most one balancer per application, so the
/// application itself is the map key.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum LoadBalancerId {
    /// Equal-cost multipath next-hop selection.
    Ecmp,
    /// Member selection within an aggregate (LAG) port.
    AggregatePort,
}

impl fmt::Display for LoadBalancerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ecmp => write!(f, "ECMP"),
            Self::AggregatePort => write!(f, "AGGREGATE_PORT"),
        }
    }
}

/// Hash function the hardware applies over the selected fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HashAlgorithm {
    Crc,
    Xor,
    Random,
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Crc => write!(f, "CRC"),
            Self::Xor => write!(f, "XOR"),
            Self::Random => write!(f, "RANDOM"),
        }
    }
}

/// IP header fields that can feed the hash.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum IpHashField {
    SourceAddress,
    DestinationAddress,
}

/// Transport header fields that can feed the hash.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum TransportHashField {
    SourcePort,
    DestinationPort,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names() {
        assert_eq!(LoadBalancerId::Ecmp.to_string(), "ECMP");
        assert_eq!(LoadBalancerId::AggregatePort.to_string(), "AGGREGATE_PORT");
        assert_eq!(HashAlgorithm::Crc.to_string(), "CRC");
    }

    #[test]
    fn test_id_is_orderable_map_key() {
        assert!(LoadBalancerId::Ecmp < LoadBalancerId::AggregatePort);
    }
}
