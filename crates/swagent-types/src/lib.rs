//! Common value types for the switch agent control plane.
//!
//! This crate provides the type-safe vocabulary shared by the state tree,
//! the configuration appliers, and the daemon:
//!
//! - [`MacAddress`]: 48-bit Ethernet MAC addresses
//! - [`PortId`] / [`AdminState`]: port identity and administrative state
//! - [`VlanId`]: IEEE 802.1Q VLAN identifiers
//! - [`IpPrefix`]: IP network prefixes (CIDR notation)
//! - [`LoadBalancerId`] / [`HashAlgorithm`] / hash-field selections
//! - [`AclAction`]: ACL entry dispositions
//! - [`CounterId`]: opaque hardware counter handles
//!
//! All types are plain values: cheap to copy or clone, orderable where they
//! serve as map keys, and serde-enabled so desired-configuration records can
//! carry them directly.

mod acl;
mod counter;
mod lb;
mod mac;
mod port;
mod prefix;
mod vlan;

pub use acl::AclAction;
pub use counter::CounterId;
pub use lb::{HashAlgorithm, IpHashField, LoadBalancerId, TransportHashField};
pub use mac::MacAddress;
pub use port::{AdminState, PortId};
pub use prefix::IpPrefix;
pub use vlan::VlanId;

/// Common error type for value parsing failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("invalid MAC address format: {0}")]
    InvalidMacAddress(String),

    #[error("invalid IP prefix format: {0}")]
    InvalidIpPrefix(String),

    #[error("invalid VLAN ID: {0} (must be 1-4094)")]
    InvalidVlanId(u16),
}
