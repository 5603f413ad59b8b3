//! ACL entry node.

use swagent_types::{AclAction, IpPrefix, VlanId};

use crate::node::{Node, NodeBase};

/// One access-control entry, keyed by its unique name.
///
/// Matchers are optional; an unset matcher is a wildcard. Priority decides
/// evaluation order in hardware, lower value first.
#[derive(Debug, Clone)]
pub struct AclEntry {
    base: NodeBase,
    name: String,
    priority: u32,
    action: AclAction,
    src_ip: Option<IpPrefix>,
    dst_ip: Option<IpPrefix>,
    vlan: Option<VlanId>,
    l4_src_port: Option<u16>,
    l4_dst_port: Option<u16>,
}

impl AclEntry {
    /// Creates an unpublished entry with all matchers unset.
    pub fn new(name: impl Into<String>, priority: u32, action: AclAction) -> Self {
        AclEntry {
            base: NodeBase::new(),
            name: name.into(),
            priority,
            action,
            src_ip: None,
            dst_ip: None,
            vlan: None,
            l4_src_port: None,
            l4_dst_port: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn priority(&self) -> u32 {
        self.priority
    }

    pub fn action(&self) -> AclAction {
        self.action
    }

    pub fn src_ip(&self) -> Option<IpPrefix> {
        self.src_ip
    }

    pub fn dst_ip(&self) -> Option<IpPrefix> {
        self.dst_ip
    }

    pub fn vlan(&self) -> Option<VlanId> {
        self.vlan
    }

    pub fn l4_src_port(&self) -> Option<u16> {
        self.l4_src_port
    }

    pub fn l4_dst_port(&self) -> Option<u16> {
        self.l4_dst_port
    }

    pub fn set_src_ip(&mut self, prefix: Option<IpPrefix>) {
        self.src_ip = prefix;
    }

    pub fn set_dst_ip(&mut self, prefix: Option<IpPrefix>) {
        self.dst_ip = prefix;
    }

    pub fn set_vlan(&mut self, vlan: Option<VlanId>) {
        self.vlan = vlan;
    }

    pub fn set_l4_src_port(&mut self, port: Option<u16>) {
        self.l4_src_port = port;
    }

    pub fn set_l4_dst_port(&mut self, port: Option<u16>) {
        self.l4_dst_port = port;
    }
}

impl PartialEq for AclEntry {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.priority == other.priority
            && self.action == other.action
            && self.src_ip == other.src_ip
            && self.dst_ip == other.dst_ip
            && self.vlan == other.vlan
            && self.l4_src_port == other.l4_src_port
            && self.l4_dst_port == other.l4_dst_port
    }
}

impl Eq for AclEntry {}

impl Node for AclEntry {
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
    fn test_new_entry_has_wildcard_matchers() {
        let entry = AclEntry::new("drop-telnet", 100, AclAction::Deny);
        assert_eq!(entry.name(), "drop-telnet");
        assert!(entry.src_ip().is_none());
        assert!(entry.l4_dst_port().is_none());
    }

    #[test]
    fn test_equality_covers_matchers() {
        let mut a = AclEntry::new("e", 1, AclAction::Permit);
        let b = AclEntry::new("e", 1, AclAction::Permit);
        assert_eq!(a, b);

        a.set_l4_dst_port(Some(23));
        assert_ne!(a, b);
    }
}
