//! Load balancer config parsing and reconciliation.

use std::sync::Arc;

use swagent_state::{LoadBalancer, LoadBalancerMap, StateResult};

use crate::applier::reconcile_map;
use crate::config::LoadBalancerConfig;
use crate::platform::Platform;

/// Turns one desired load balancer record into a candidate node.
pub struct LoadBalancerConfigParser<'a, P: Platform + ?Sized> {
    platform: &'a P,
}

impl<'a, P: Platform + ?Sized> LoadBalancerConfigParser<'a, P> {
    pub fn new(platform: &'a P) -> Self {
        LoadBalancerConfigParser { platform }
    }

    /// Parses a record, deriving the seed deterministically when unset.
    ///
    /// The derived seed depends only on the balancer ID and the switch's
    /// burned-in MAC, so a restarted agent parsing the same record lands
    /// on a node value-equal to the one it published before the restart.
    pub fn parse(&self, config: &LoadBalancerConfig) -> LoadBalancer {
        let seed = config.seed.unwrap_or_else(|| {
            LoadBalancer::deterministic_seed(config.id, self.platform.local_mac())
        });
        LoadBalancer::new(
            config.id,
            config.algorithm,
            seed,
            config.ipv4_fields.iter().copied().collect(),
            config.ipv6_fields.iter().copied().collect(),
            config.transport_fields.iter().copied().collect(),
        )
    }
}

/// Reconciles one batch of load balancer records against the current map.
pub struct LoadBalancerConfigApplier<'a, P: Platform + ?Sized> {
    original: &'a LoadBalancerMap,
    configs: &'a [LoadBalancerConfig],
    platform: &'a P,
}

impl<'a, P: Platform + ?Sized> LoadBalancerConfigApplier<'a, P> {
    pub fn new(
        original: &'a LoadBalancerMap,
        configs: &'a [LoadBalancerConfig],
        platform: &'a P,
    ) -> Self {
        LoadBalancerConfigApplier {
            original,
            configs,
            platform,
        }
    }

    /// Returns the next load balancer map, or `None` when the batch matches
    /// the current map value-for-value.
    pub fn update_load_balancers(&self) -> StateResult<Option<LoadBalancerMap>> {
        let parser = LoadBalancerConfigParser::new(self.platform);
        let candidates = self
            .configs
            .iter()
            .map(|config| {
                let balancer = parser.parse(config);
                (balancer.id(), Arc::new(balancer))
            })
            .collect();

        Ok(reconcile_map(self.original, candidates)?
            .map(|contents| self.original.clone_with(contents)))
    }
}
