//! Platform context supplying environment-specific defaults.

use swagent_types::MacAddress;

/// Read-only queries against the environment the agent runs on.
///
/// The appliers use this for deterministic default generation only; all
/// queries must be pure so two independently restarted agents derive the
/// same defaults from the same hardware.
pub trait Platform: Send + Sync {
    /// The switch's burned-in MAC address: the stable local identity.
    fn local_mac(&self) -> MacAddress;
}

/// Platform backed by values handed in at startup.
#[derive(Debug, Clone)]
pub struct FixedPlatform {
    mac: MacAddress,
}

impl FixedPlatform {
    /// Creates a platform with the given local MAC.
    pub fn new(mac: MacAddress) -> Self {
        FixedPlatform { mac }
    }
}

impl Platform for FixedPlatform {
    fn local_mac(&self) -> MacAddress {
        self.mac
    }
}
