//! Per-domain deltas between two published roots.

use std::sync::Arc;

use swagent_types::{IpPrefix, LoadBalancerId, PortId};

use crate::acl::AclEntry;
use crate::delta::NodeMapDelta;
use crate::lb::LoadBalancer;
use crate::port::Port;
use crate::route::Route;
use crate::switch_state::SwitchState;

/// The pair of roots a hardware-sync pass works from.
///
/// Holding both `Arc`s keeps every node of both generations alive for as
/// long as the sync runs, so the per-domain walks can hand out borrowed
/// entries without copying anything.
#[derive(Debug, Clone)]
pub struct StateDelta {
    old: Arc<SwitchState>,
    new: Arc<SwitchState>,
}

impl StateDelta {
    /// Creates a delta from the previously published root to the new one.
    pub fn new(old: Arc<SwitchState>, new: Arc<SwitchState>) -> Self {
        StateDelta { old, new }
    }

    /// The previously published root.
    pub fn old_state(&self) -> &Arc<SwitchState> {
        &self.old
    }

    /// The newly published root.
    pub fn new_state(&self) -> &Arc<SwitchState> {
        &self.new
    }

    /// Walks the port map delta.
    pub fn ports_delta(&self) -> NodeMapDelta<'_, PortId, Port> {
        NodeMapDelta::new(self.old.ports(), self.new.ports())
    }

    /// Walks the ACL map delta.
    pub fn acls_delta(&self) -> NodeMapDelta<'_, String, AclEntry> {
        NodeMapDelta::new(self.old.acls(), self.new.acls())
    }

    /// Walks the load balancer map delta.
    pub fn load_balancers_delta(&self) -> NodeMapDelta<'_, LoadBalancerId, LoadBalancer> {
        NodeMapDelta::new(self.old.load_balancers(), self.new.load_balancers())
    }

    /// Walks the route map delta.
    pub fn routes_delta(&self) -> NodeMapDelta<'_, IpPrefix, Route> {
        NodeMapDelta::new(self.old.routes(), self.new.routes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delta::DeltaEntry;
    use crate::node::Node;
    use crate::switch_state::PortMap;
    use swagent_types::AdminState;

    #[test]
    fn test_domain_deltas_see_only_their_map() {
        let old = Arc::new(SwitchState::new());
        old.publish();

        let mut handle = Arc::clone(&old);
        let ports = SwitchState::modify_ports(&mut handle);
        ports
            .insert(
                PortId(1),
                Arc::new(Port::new(PortId(1), "Ethernet0", 25_000, 9100, AdminState::Up)),
            )
            .unwrap();
        handle.publish();

        let delta = StateDelta::new(old, handle);
        let port_entries: Vec<_> = delta.ports_delta().collect();
        assert_eq!(port_entries.len(), 1);
        assert!(matches!(port_entries[0], DeltaEntry::Added { .. }));
        assert_eq!(delta.acls_delta().count(), 0);
        assert_eq!(delta.routes_delta().count(), 0);
    }

    #[test]
    fn test_delta_keeps_old_generation_alive() {
        let old = Arc::new(SwitchState::new());
        old.publish();
        let new = Arc::new(SwitchState::clone(&old));
        new.publish();

        let delta = StateDelta::new(Arc::clone(&old), new);
        drop(old);
        // The delta still owns the old root.
        assert!(delta.old_state().is_published());
        let _ = delta.ports_delta();
    }

    #[test]
    fn test_untouched_map_reports_all_unchanged() {
        let mut root = SwitchState::new();
        let mut ports = PortMap::new();
        ports
            .insert(
                PortId(1),
                Arc::new(Port::new(PortId(1), "Ethernet0", 25_000, 9100, AdminState::Up)),
            )
            .unwrap();
        root.reset_ports(Arc::new(ports));
        let old = Arc::new(root);
        old.publish();

        // New generation shares the port map wholesale.
        let new = Arc::new(SwitchState::clone(&old));
        new.publish();

        let delta = StateDelta::new(old, new);
        for entry in delta.ports_delta() {
            assert!(!entry.is_change());
        }
    }
}
