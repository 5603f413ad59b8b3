//! Configuration appliers: reconcile desired records against current state.
//!
//! Every domain follows one pattern, implemented once in
//! [`reconcile_map`]: parse records into candidate nodes, reject duplicate
//! IDs, substitute the original node instance wherever the candidate is
//! value-equal to it, detect removals by explicit key-set difference, and
//! either report "nothing changed" or hand back the contents of the next
//! map generation.
//!
//! The identity-preservation step is the load-bearing part. The delta
//! engine classifies entries by instance identity, so an applier that
//! rebuilt a value-equal node and kept the fresh instance would make the
//! hardware layer reprogram entries that did not change.

mod acl;
mod apply;
mod lb;
mod port;
mod route;

pub use acl::update_acl_entries;
pub use apply::apply_config;
pub use lb::{LoadBalancerConfigApplier, LoadBalancerConfigParser};
pub use port::update_ports;
pub use route::update_routes;

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use swagent_state::{Node, NodeMap, StateError, StateResult};

/// Reconciles an ordered batch of candidate nodes against the current map.
///
/// Returns `Ok(None)` when the batch is value-identical to the current map
/// (the no-op sentinel), or `Ok(Some(contents))` with the full contents of
/// the next map generation. `contents` references the *original* node
/// instance for every entry whose fields did not change.
///
/// Fails with [`StateError::DuplicateId`] if two candidates share a key;
/// nothing is reported changed in that case and the caller must abort the
/// whole attempt.
pub fn reconcile_map<K, V>(
    original: &NodeMap<K, V>,
    candidates: Vec<(K, Arc<V>)>,
) -> StateResult<Option<BTreeMap<K, Arc<V>>>>
where
    K: Ord + fmt::Display,
    V: Node + PartialEq,
{
    let mut contents: BTreeMap<K, Arc<V>> = BTreeMap::new();
    let mut changed = false;

    for (key, candidate) in candidates {
        match contents.entry(key) {
            Entry::Occupied(occupied) => {
                return Err(StateError::duplicate_id(occupied.key()));
            }
            Entry::Vacant(vacant) => {
                let node = match original.get_if(vacant.key()) {
                    // The candidate cannot stand in for the original even
                    // though they are equal: downstream deltas compare
                    // instance identity, so the fresh instance would read
                    // as a change. Reuse the original.
                    Some(existing) if **existing == *candidate => Arc::clone(existing),
                    Some(_) | None => {
                        changed = true;
                        candidate
                    }
                };
                vacant.insert(node);
            }
        }
    }

    // Entries present before but absent from the batch are removals. This
    // is an explicit key-set difference; a processed-entry count would
    // miscount if two records ever collapsed onto one key.
    if !changed {
        changed = original.iter().any(|(key, _)| !contents.contains_key(key));
    }

    Ok(changed.then_some(contents))
}
