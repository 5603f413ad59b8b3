//! Route node.

use std::collections::BTreeSet;
use std::net::IpAddr;

use swagent_types::IpPrefix;

use crate::node::{Node, NodeBase};

/// One forwarding entry, keyed by its destination prefix.
#[derive(Debug, Clone)]
pub struct Route {
    base: NodeBase,
    prefix: IpPrefix,
    next_hops: BTreeSet<IpAddr>,
}

impl Route {
    /// Creates an unpublished route node.
    pub fn new(prefix: IpPrefix, next_hops: BTreeSet<IpAddr>) -> Self {
        Route {
            base: NodeBase::new(),
            prefix,
            next_hops,
        }
    }

    pub fn prefix(&self) -> IpPrefix {
        self.prefix
    }

    pub fn next_hops(&self) -> &BTreeSet<IpAddr> {
        &self.next_hops
    }
}

impl PartialEq for Route {
    fn eq(&self, other: &Self) -> bool {
        self.prefix == other.prefix && self.next_hops == other.next_hops
    }
}

impl Eq for Route {}

impl Node for Route {
    fn is_published(&self) -> bool {
        self.base.is_published()
    }

    fn publish(&self) {
        self.base.mark_published();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_covers_next_hop_set() {
        let prefix: IpPrefix = "10.0.0.0/8".parse().unwrap();
        let hops: BTreeSet<IpAddr> = ["192.168.0.1".parse().unwrap()].into_iter().collect();
        let a = Route::new(prefix, hops.clone());
        let b = Route::new(prefix, hops);
        assert_eq!(a, b);

        let c = Route::new(prefix, BTreeSet::new());
        assert_ne!(a, c);
    }
}
