//! ACL entry reconciliation.

use std::sync::Arc;

use swagent_state::{AclEntry, AclMap, StateResult};

use crate::applier::reconcile_map;
use crate::config::AclEntryConfig;

fn parse_acl_entry(config: &AclEntryConfig) -> AclEntry {
    let mut entry = AclEntry::new(config.name.clone(), config.priority, config.action);
    entry.set_src_ip(config.src_ip);
    entry.set_dst_ip(config.dst_ip);
    entry.set_vlan(config.vlan);
    entry.set_l4_src_port(config.l4_src_port);
    entry.set_l4_dst_port(config.l4_dst_port);
    entry
}

/// Returns the next ACL map, or `None` when the batch matches the current
/// map value-for-value.
pub fn update_acl_entries(
    original: &AclMap,
    configs: &[AclEntryConfig],
) -> StateResult<Option<AclMap>> {
    let candidates = configs
        .iter()
        .map(|config| {
            let entry = parse_acl_entry(config);
            (entry.name().to_string(), Arc::new(entry))
        })
        .collect();

    Ok(reconcile_map(original, candidates)?.map(|contents| original.clone_with(contents)))
}
