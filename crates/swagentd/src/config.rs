//! Desired-configuration records.
//!
//! One record per entity the operator wants to exist, grouped per domain.
//! Records are assumed structurally valid when they reach the appliers; the
//! serde layer here is transport, not a schema validator. Semantic
//! problems (duplicate IDs within a batch) are caught by the appliers.

use std::fs;
use std::net::IpAddr;
use std::path::Path;

use serde::{Deserialize, Serialize};

use swagent_types::{
    AclAction, AdminState, HashAlgorithm, IpHashField, IpPrefix, LoadBalancerId, PortId,
    TransportHashField, VlanId,
};

use crate::error::{AgentError, AgentResult};

/// Desired state of one front-panel port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortConfig {
    pub id: PortId,
    pub name: String,
    pub speed_mbps: u32,
    /// Defaults to the jumbo-frame MTU used across the fleet.
    #[serde(default = "default_mtu")]
    pub mtu: u32,
    #[serde(default)]
    pub admin_state: AdminState,
}

fn default_mtu() -> u32 {
    9100
}

/// Desired state of one ACL entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AclEntryConfig {
    pub name: String,
    pub priority: u32,
    pub action: AclAction,
    #[serde(default)]
    pub src_ip: Option<IpPrefix>,
    #[serde(default)]
    pub dst_ip: Option<IpPrefix>,
    #[serde(default)]
    pub vlan: Option<VlanId>,
    #[serde(default)]
    pub l4_src_port: Option<u16>,
    #[serde(default)]
    pub l4_dst_port: Option<u16>,
}

/// Desired state of one load balancer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadBalancerConfig {
    pub id: LoadBalancerId,
    pub algorithm: HashAlgorithm,
    /// Unset means: derive a deterministic seed from the switch identity.
    #[serde(default)]
    pub seed: Option<u32>,
    #[serde(default)]
    pub ipv4_fields: Vec<IpHashField>,
    #[serde(default)]
    pub ipv6_fields: Vec<IpHashField>,
    #[serde(default)]
    pub transport_fields: Vec<TransportHashField>,
}

/// Desired state of one route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteConfig {
    pub prefix: IpPrefix,
    pub next_hops: Vec<IpAddr>,
}

/// One complete desired-configuration generation, all domains.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentConfig {
    #[serde(default)]
    pub ports: Vec<PortConfig>,
    #[serde(default)]
    pub acl_entries: Vec<AclEntryConfig>,
    #[serde(default)]
    pub load_balancers: Vec<LoadBalancerConfig>,
    #[serde(default)]
    pub routes: Vec<RouteConfig>,
}

impl AgentConfig {
    /// Loads a configuration generation from a JSON file.
    pub fn from_json_file(path: &Path) -> AgentResult<Self> {
        let raw = fs::read_to_string(path).map_err(|source| AgentError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| AgentError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_full_config() {
        let raw = r#"{
            "ports": [
                {"id": 1, "name": "Ethernet0", "speed_mbps": 100000, "admin_state": "up"}
            ],
            "acl_entries": [
                {"name": "drop-telnet", "priority": 10, "action": "deny", "l4_dst_port": 23}
            ],
            "load_balancers": [
                {"id": "ecmp", "algorithm": "crc",
                 "ipv4_fields": ["source_address", "destination_address"]}
            ],
            "routes": [
                {"prefix": "10.0.0.0/8", "next_hops": ["192.168.0.1"]}
            ]
        }"#;

        let config: AgentConfig = serde_json::from_str(raw).unwrap();
        assert_eq!(config.ports.len(), 1);
        assert_eq!(config.ports[0].mtu, 9100);
        assert_eq!(config.acl_entries[0].l4_dst_port, Some(23));
        assert_eq!(config.load_balancers[0].id, LoadBalancerId::Ecmp);
        assert!(config.load_balancers[0].seed.is_none());
        assert_eq!(config.routes[0].next_hops.len(), 1);
    }

    #[test]
    fn test_empty_object_is_empty_config() {
        let config: AgentConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, AgentConfig::default());
    }
}
