//! Front-panel port node.

use swagent_types::{AdminState, PortId};

use crate::node::{Node, NodeBase};

/// Configuration of one front-panel port.
#[derive(Debug, Clone)]
pub struct Port {
    base: NodeBase,
    id: PortId,
    name: String,
    speed_mbps: u32,
    mtu: u32,
    admin_state: AdminState,
}

impl Port {
    /// Creates an unpublished port node.
    pub fn new(
        id: PortId,
        name: impl Into<String>,
        speed_mbps: u32,
        mtu: u32,
        admin_state: AdminState,
    ) -> Self {
        Port {
            base: NodeBase::new(),
            id,
            name: name.into(),
            speed_mbps,
            mtu,
            admin_state,
        }
    }

    pub fn id(&self) -> PortId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn speed_mbps(&self) -> u32 {
        self.speed_mbps
    }

    pub fn mtu(&self) -> u32 {
        self.mtu
    }

    pub fn admin_state(&self) -> AdminState {
        self.admin_state
    }

    pub fn set_admin_state(&mut self, admin_state: AdminState) {
        self.admin_state = admin_state;
    }
}

impl PartialEq for Port {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.name == other.name
            && self.speed_mbps == other.speed_mbps
            && self.mtu == other.mtu
            && self.admin_state == other.admin_state
    }
}

impl Eq for Port {}

impl Node for Port {
    fn is_published(&self) -> bool {
        self.base.is_published()
    }

    fn publish(&self) {
        self.base.mark_published();
    }
}
