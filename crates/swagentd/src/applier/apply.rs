//! Top-level config application across all domains.

use std::sync::Arc;

use log::debug;

use swagent_state::{StateResult, SwitchState};

use crate::applier::lb::LoadBalancerConfigApplier;
use crate::applier::{update_acl_entries, update_ports, update_routes};
use crate::config::AgentConfig;
use crate::platform::Platform;

/// Reconciles one desired-configuration generation against the current
/// root.
///
/// Returns the new unpublished root when any domain changed, or `None`
/// when the desired configuration is value-identical to the running state
/// (the caller skips the whole publish cycle). On error nothing new
/// becomes reachable: the current root and all of its children are left
/// untouched.
///
/// Domains that did not change keep their map's identity in the new root,
/// so downstream deltas skip them entirely.
pub fn apply_config<P: Platform + ?Sized>(
    state: &Arc<SwitchState>,
    config: &AgentConfig,
    platform: &P,
) -> StateResult<Option<Arc<SwitchState>>> {
    let mut new_state = Arc::clone(state);
    let mut changed = false;

    if let Some(ports) = update_ports(state.ports(), &config.ports)? {
        debug!("port map changed ({} entries)", ports.len());
        SwitchState::modify(&mut new_state).reset_ports(Arc::new(ports));
        changed = true;
    }

    if let Some(acls) = update_acl_entries(state.acls(), &config.acl_entries)? {
        debug!("ACL map changed ({} entries)", acls.len());
        SwitchState::modify(&mut new_state).reset_acls(Arc::new(acls));
        changed = true;
    }

    let lb_applier =
        LoadBalancerConfigApplier::new(state.load_balancers(), &config.load_balancers, platform);
    if let Some(load_balancers) = lb_applier.update_load_balancers()? {
        debug!("load balancer map changed ({} entries)", load_balancers.len());
        SwitchState::modify(&mut new_state).reset_load_balancers(Arc::new(load_balancers));
        changed = true;
    }

    if let Some(routes) = update_routes(state.routes(), &config.routes)? {
        debug!("route map changed ({} entries)", routes.len());
        SwitchState::modify(&mut new_state).reset_routes(Arc::new(routes));
        changed = true;
    }

    Ok(changed.then_some(new_state))
}
