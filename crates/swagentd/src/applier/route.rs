//! Route reconciliation.

use std::sync::Arc;

use swagent_state::{Route, RouteMap, StateResult};

use crate::applier::reconcile_map;
use crate::config::RouteConfig;

/// Returns the next route map, or `None` when the batch matches the current
/// map value-for-value.
pub fn update_routes(original: &RouteMap, configs: &[RouteConfig]) -> StateResult<Option<RouteMap>> {
    let candidates = configs
        .iter()
        .map(|config| {
            let route = Route::new(config.prefix, config.next_hops.iter().copied().collect());
            (config.prefix, Arc::new(route))
        })
        .collect();

    Ok(reconcile_map(original, candidates)?.map(|contents| original.clone_with(contents)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use swagent_state::Node;
    use swagent_types::IpPrefix;

    fn route(prefix: &str, next_hop: &str) -> RouteConfig {
        RouteConfig {
            prefix: prefix.parse().unwrap(),
            next_hops: vec![next_hop.parse().unwrap()],
        }
    }

    #[test]
    fn test_next_hop_change_is_detected() {
        let first = update_routes(&RouteMap::new(), &[route("10.0.0.0/8", "192.168.0.1")])
            .unwrap()
            .unwrap();
        first.publish();

        assert!(update_routes(&first, &[route("10.0.0.0/8", "192.168.0.1")])
            .unwrap()
            .is_none());

        let next = update_routes(&first, &[route("10.0.0.0/8", "192.168.0.2")])
            .unwrap()
            .unwrap();
        let key: IpPrefix = "10.0.0.0/8".parse().unwrap();
        assert!(!Arc::ptr_eq(
            next.get_if(&key).unwrap(),
            first.get_if(&key).unwrap(),
        ));
    }

    #[test]
    fn test_duplicate_prefix_fails() {
        let batch = [route("10.0.0.0/8", "192.168.0.1"), route("10.0.0.0/8", "192.168.0.2")];
        assert!(update_routes(&RouteMap::new(), &batch).is_err());
    }
}
