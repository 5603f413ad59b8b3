//! Hardware-sync collaborator seam.

use std::fmt;

use async_trait::async_trait;
use log::{debug, info};

use swagent_state::{DeltaEntry, Node, NodeMapDelta, StateDelta};

/// Downstream consumer of published state generations.
///
/// Given the delta between the previous and the new root, an
/// implementation translates Added/Removed/Changed entries into idempotent
/// backend operations. It has no write access to the tree; blocking and
/// I/O belong entirely on this side of the seam, after publication.
#[async_trait]
pub trait HwSwitch: Send + Sync {
    /// Reacts to a newly published root.
    async fn state_changed(&self, delta: &StateDelta);
}

/// Backend stub that logs what it would program.
///
/// Stands in for a real ASIC backend during bring-up and in tests of the
/// daemon loop.
#[derive(Debug, Default)]
pub struct LoggingHwSwitch;

#[async_trait]
impl HwSwitch for LoggingHwSwitch {
    async fn state_changed(&self, delta: &StateDelta) {
        sync_domain("port", delta.ports_delta());
        sync_domain("acl", delta.acls_delta());
        sync_domain("load-balancer", delta.load_balancers_delta());
        sync_domain("route", delta.routes_delta());
    }
}

/// Walks one domain delta, logging each operation it implies.
///
/// Unchanged entries are skipped without touching the node payload at all:
/// the classification is the identity test, which is the whole point of
/// the producers' reuse discipline.
fn sync_domain<K, V>(domain: &str, delta: NodeMapDelta<'_, K, V>)
where
    K: Ord + fmt::Display,
    V: Node,
{
    let (mut added, mut removed, mut changed) = (0usize, 0usize, 0usize);
    for entry in delta {
        match entry {
            DeltaEntry::Added { key, .. } => {
                added += 1;
                debug!("{domain} {key}: program new entry");
            }
            DeltaEntry::Removed { key, .. } => {
                removed += 1;
                debug!("{domain} {key}: tear down entry");
            }
            DeltaEntry::Changed { key, .. } => {
                changed += 1;
                debug!("{domain} {key}: reprogram entry");
            }
            DeltaEntry::Unchanged { .. } => {}
        }
    }
    if added + removed + changed > 0 {
        info!("{domain} sync: {added} added, {removed} removed, {changed} changed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use swagent_state::{Port, PortMap, SwitchState};
    use swagent_types::{AdminState, PortId};

    #[tokio::test]
    async fn test_logging_backend_walks_all_domains() {
        let old = Arc::new(SwitchState::new());
        old.publish();

        let mut root = SwitchState::clone(&old);
        let mut ports = PortMap::new();
        ports
            .insert(
                PortId(1),
                Arc::new(Port::new(PortId(1), "Ethernet0", 25_000, 9100, AdminState::Up)),
            )
            .unwrap();
        root.reset_ports(Arc::new(ports));
        let new = Arc::new(root);
        new.publish();

        // Smoke test: the walk must complete over every domain.
        let delta = StateDelta::new(old, new);
        LoggingHwSwitch.state_changed(&delta).await;
    }
}
