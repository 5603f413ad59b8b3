//! Load balancer node: hash algorithm, seed, and field selections.

use std::collections::BTreeSet;

use swagent_types::{
    HashAlgorithm, IpHashField, LoadBalancerId, MacAddress, TransportHashField,
};

use crate::node::{Node, NodeBase};

/// Hashing program for one load-balancing application (ECMP or LAG).
#[derive(Debug, Clone)]
pub struct LoadBalancer {
    base: NodeBase,
    id: LoadBalancerId,
    algorithm: HashAlgorithm,
    seed: u32,
    ipv4_fields: BTreeSet<IpHashField>,
    ipv6_fields: BTreeSet<IpHashField>,
    transport_fields: BTreeSet<TransportHashField>,
}

impl LoadBalancer {
    /// Creates an unpublished load balancer node.
    pub fn new(
        id: LoadBalancerId,
        algorithm: HashAlgorithm,
        seed: u32,
        ipv4_fields: BTreeSet<IpHashField>,
        ipv6_fields: BTreeSet<IpHashField>,
        transport_fields: BTreeSet<TransportHashField>,
    ) -> Self {
        LoadBalancer {
            base: NodeBase::new(),
            id,
            algorithm,
            seed,
            ipv4_fields,
            ipv6_fields,
            transport_fields,
        }
    }

    pub fn id(&self) -> LoadBalancerId {
        self.id
    }

    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn ipv4_fields(&self) -> &BTreeSet<IpHashField> {
        &self.ipv4_fields
    }

    pub fn ipv6_fields(&self) -> &BTreeSet<IpHashField> {
        &self.ipv6_fields
    }

    pub fn transport_fields(&self) -> &BTreeSet<TransportHashField> {
        &self.transport_fields
    }

    /// Derives the seed used when a desired-configuration record leaves it
    /// unset.
    ///
    /// The derivation is a pure function of the balancer ID and the
    /// switch's burned-in MAC: two independently restarted agents on the
    /// same switch converge on the same seed with no coordination, while
    /// the two applications still get decorrelated values from the same
    /// MAC.
    pub fn deterministic_seed(id: LoadBalancerId, local_mac: MacAddress) -> u32 {
        let mac = local_mac.as_u64();
        match id {
            LoadBalancerId::Ecmp => mix32(mac as u32),
            LoadBalancerId::AggregatePort => mix64(mac) as u32,
        }
    }
}

/// 32-bit avalanche mixer. Stable forever: derived seeds must survive
/// process restarts and agent upgrades unchanged.
fn mix32(mut key: u32) -> u32 {
    key = key.wrapping_add(key << 12);
    key ^= key >> 22;
    key = key.wrapping_add(key << 4);
    key ^= key >> 9;
    key = key.wrapping_add(key << 10);
    key ^= key >> 2;
    key = key.wrapping_add(key << 7);
    key ^= key >> 12;
    key
}

/// 64-bit avalanche mixer, folded to 32 bits by the caller. Stable forever.
fn mix64(mut key: u64) -> u64 {
    key = (!key).wrapping_add(key << 21);
    key ^= key >> 24;
    key = key.wrapping_add(key << 3).wrapping_add(key << 8);
    key ^= key >> 14;
    key = key.wrapping_add(key << 2).wrapping_add(key << 4);
    key ^= key >> 28;
    key = key.wrapping_add(key << 31);
    key
}

impl PartialEq for LoadBalancer {
    /// Payload equality; the publish flag is bookkeeping, not value.
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.algorithm == other.algorithm
            && self.seed == other.seed
            && self.ipv4_fields == other.ipv4_fields
            && self.ipv6_fields == other.ipv6_fields
            && self.transport_fields == other.transport_fields
    }
}

impl Eq for LoadBalancer {}

impl Node for LoadBalancer {
    fn is_published(&self) -> bool {
        self.base.is_published()
    }

    fn publish(&self) {
        self.base.mark_published();
    }
}
