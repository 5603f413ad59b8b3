//! Port reconciliation.

use std::sync::Arc;

use swagent_state::{Port, PortMap, StateResult};

use crate::applier::reconcile_map;
use crate::config::PortConfig;

fn parse_port(config: &PortConfig) -> Port {
    Port::new(
        config.id,
        config.name.clone(),
        config.speed_mbps,
        config.mtu,
        config.admin_state,
    )
}

/// Returns the next port map, or `None` when the batch matches the current
/// map value-for-value.
pub fn update_ports(original: &PortMap, configs: &[PortConfig]) -> StateResult<Option<PortMap>> {
    let candidates = configs
        .iter()
        .map(|config| (config.id, Arc::new(parse_port(config))))
        .collect();

    Ok(reconcile_map(original, candidates)?.map(|contents| original.clone_with(contents)))
}
