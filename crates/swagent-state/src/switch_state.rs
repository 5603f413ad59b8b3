//! The root of the state tree: one node map per configuration domain.

use std::sync::Arc;

use swagent_types::{IpPrefix, LoadBalancerId, PortId};

use crate::acl::AclEntry;
use crate::lb::LoadBalancer;
use crate::map::NodeMap;
use crate::node::{arc_writable, check_unpublished, Node, NodeBase};
use crate::port::Port;
use crate::route::Route;

/// All front-panel ports, keyed by port ID.
pub type PortMap = NodeMap<PortId, Port>;
/// All ACL entries, keyed by entry name.
pub type AclMap = NodeMap<String, AclEntry>;
/// All load balancers, keyed by application.
pub type LoadBalancerMap = NodeMap<LoadBalancerId, LoadBalancer>;
/// All routes, keyed by destination prefix.
pub type RouteMap = NodeMap<IpPrefix, Route>;

/// One generation of the switch's running configuration.
///
/// The root owns one map per domain; untouched maps are shared between
/// generations, so cloning a root is cheap and updating one domain leaves
/// every sibling's identity intact.
///
/// # Copy-on-write
///
/// [`SwitchState::modify`] and the per-domain `modify_*` helpers implement
/// path cloning: given the writer's handle to the current root, they clone
/// exactly the nodes on the root-to-target path when those are already
/// published, and hand back the existing writable instances when they are
/// not. Callers never hand-roll the cloning.
///
/// ```
/// use std::sync::Arc;
/// use swagent_state::{Node, SwitchState};
///
/// let root = Arc::new(SwitchState::new());
/// root.publish();
///
/// let mut next = Arc::clone(&root);
/// let ports = SwitchState::modify_ports(&mut next);
/// assert!(ports.is_empty());
/// // `next` now points at a fresh unpublished generation; `root` is
/// // untouched.
/// assert!(!Arc::ptr_eq(&root, &next));
/// ```
#[derive(Debug, Clone)]
pub struct SwitchState {
    base: NodeBase,
    ports: Arc<PortMap>,
    acls: Arc<AclMap>,
    load_balancers: Arc<LoadBalancerMap>,
    routes: Arc<RouteMap>,
}

impl SwitchState {
    /// Creates an empty, unpublished root.
    pub fn new() -> Self {
        SwitchState {
            base: NodeBase::new(),
            ports: Arc::new(PortMap::new()),
            acls: Arc::new(AclMap::new()),
            load_balancers: Arc::new(LoadBalancerMap::new()),
            routes: Arc::new(RouteMap::new()),
        }
    }

    pub fn ports(&self) -> &Arc<PortMap> {
        &self.ports
    }

    pub fn acls(&self) -> &Arc<AclMap> {
        &self.acls
    }

    pub fn load_balancers(&self) -> &Arc<LoadBalancerMap> {
        &self.load_balancers
    }

    pub fn routes(&self) -> &Arc<RouteMap> {
        &self.routes
    }

    /// Replaces the port map. Panics if this root has been published.
    pub fn reset_ports(&mut self, ports: Arc<PortMap>) {
        check_unpublished(self.base.is_published(), "switch state");
        self.ports = ports;
    }

    /// Replaces the ACL map. Panics if this root has been published.
    pub fn reset_acls(&mut self, acls: Arc<AclMap>) {
        check_unpublished(self.base.is_published(), "switch state");
        self.acls = acls;
    }

    /// Replaces the load balancer map. Panics if this root has been
    /// published.
    pub fn reset_load_balancers(&mut self, load_balancers: Arc<LoadBalancerMap>) {
        check_unpublished(self.base.is_published(), "switch state");
        self.load_balancers = load_balancers;
    }

    /// Replaces the route map. Panics if this root has been published.
    pub fn reset_routes(&mut self, routes: Arc<RouteMap>) {
        check_unpublished(self.base.is_published(), "switch state");
        self.routes = routes;
    }

    /// Returns a writable reference to the root behind the writer's handle.
    ///
    /// If the handle points at a published root, the handle is first
    /// repointed at a fresh unpublished clone (sharing all child maps); an
    /// already-unpublished root is returned directly.
    pub fn modify(state: &mut Arc<SwitchState>) -> &mut SwitchState {
        if state.is_published() {
            *state = Arc::new(SwitchState::clone(state));
        }
        arc_writable(state, "switch state")
    }

    /// Returns a writable port map, cloning the root-to-map path as needed.
    pub fn modify_ports(state: &mut Arc<SwitchState>) -> &mut PortMap {
        let root = Self::modify(state);
        if root.ports.is_published() {
            root.ports = Arc::new(PortMap::clone(&root.ports));
        }
        arc_writable(&mut root.ports, "port map")
    }

    /// Returns a writable ACL map, cloning the root-to-map path as needed.
    pub fn modify_acls(state: &mut Arc<SwitchState>) -> &mut AclMap {
        let root = Self::modify(state);
        if root.acls.is_published() {
            root.acls = Arc::new(AclMap::clone(&root.acls));
        }
        arc_writable(&mut root.acls, "ACL map")
    }

    /// Returns a writable load balancer map, cloning the root-to-map path
    /// as needed.
    pub fn modify_load_balancers(state: &mut Arc<SwitchState>) -> &mut LoadBalancerMap {
        let root = Self::modify(state);
        if root.load_balancers.is_published() {
            root.load_balancers = Arc::new(LoadBalancerMap::clone(&root.load_balancers));
        }
        arc_writable(&mut root.load_balancers, "load balancer map")
    }

    /// Returns a writable route map, cloning the root-to-map path as
    /// needed.
    pub fn modify_routes(state: &mut Arc<SwitchState>) -> &mut RouteMap {
        let root = Self::modify(state);
        if root.routes.is_published() {
            root.routes = Arc::new(RouteMap::clone(&root.routes));
        }
        arc_writable(&mut root.routes, "route map")
    }
}

impl Default for SwitchState {
    fn default() -> Self {
        SwitchState::new()
    }
}

impl Node for SwitchState {
    fn is_published(&self) -> bool {
        self.base.is_published()
    }

    fn publish(&self) {
        self.base.mark_published();
        self.ports.publish();
        self.acls.publish();
        self.load_balancers.publish();
        self.routes.publish();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use swagent_types::{AclAction, AdminState};

    fn published_root_with_port() -> Arc<SwitchState> {
        let mut root = SwitchState::new();
        let mut ports = PortMap::new();
        ports
            .insert(
                PortId(1),
                Arc::new(Port::new(PortId(1), "Ethernet0", 100_000, 9100, AdminState::Up)),
            )
            .unwrap();
        root.reset_ports(Arc::new(ports));
        let root = Arc::new(root);
        root.publish();
        root
    }

    #[test]
    fn test_publish_is_deep() {
        let root = published_root_with_port();
        assert!(root.is_published());
        assert!(root.ports().is_published());
        assert!(root.ports().get_if(&PortId(1)).unwrap().is_published());
        assert!(root.acls().is_published());
    }

    #[test]
    fn test_modify_on_published_root_clones() {
        let root = published_root_with_port();
        let mut handle = Arc::clone(&root);

        let writable = SwitchState::modify(&mut handle);
        assert!(!writable.is_published());
        assert!(!Arc::ptr_eq(&root, &handle));
        // Children are shared until touched.
        assert!(Arc::ptr_eq(root.ports(), handle.ports()));
    }

    #[test]
    fn test_modify_on_unpublished_root_returns_same_instance() {
        let mut handle = Arc::new(SwitchState::new());
        let before = Arc::as_ptr(&handle);
        let _ = SwitchState::modify(&mut handle);
        assert_eq!(before, Arc::as_ptr(&handle));
    }

    #[test]
    fn test_modify_ports_clones_path_and_keeps_siblings() {
        let root = published_root_with_port();
        let mut handle = Arc::clone(&root);

        let ports = SwitchState::modify_ports(&mut handle);
        ports
            .insert(
                PortId(2),
                Arc::new(Port::new(PortId(2), "Ethernet4", 100_000, 9100, AdminState::Down)),
            )
            .unwrap();

        // The touched path has new identity...
        assert!(!Arc::ptr_eq(&root, &handle));
        assert!(!Arc::ptr_eq(root.ports(), handle.ports()));
        // ...the untouched port node and every sibling map keep theirs.
        assert!(Arc::ptr_eq(
            root.ports().get_if(&PortId(1)).unwrap(),
            handle.ports().get_if(&PortId(1)).unwrap(),
        ));
        assert!(Arc::ptr_eq(root.acls(), handle.acls()));
        assert!(Arc::ptr_eq(root.routes(), handle.routes()));
        // The old generation is untouched.
        assert_eq!(root.ports().len(), 1);
        assert_eq!(handle.ports().len(), 2);
    }

    #[test]
    fn test_modify_twice_clones_once() {
        let root = published_root_with_port();
        let mut handle = Arc::clone(&root);

        let _ = SwitchState::modify_acls(&mut handle);
        let after_first = Arc::as_ptr(&handle);
        let acls = SwitchState::modify_acls(&mut handle);
        acls.insert(
            "allow-all".to_string(),
            Arc::new(AclEntry::new("allow-all", 1, AclAction::Permit)),
        )
        .unwrap();
        assert_eq!(after_first, Arc::as_ptr(&handle));
    }

    #[test]
    #[should_panic(expected = "structural invariant violated")]
    fn test_reset_on_published_root_panics() {
        let root = Arc::new(SwitchState::new());
        root.publish();
        let mut owned = Arc::try_unwrap(root).unwrap();
        owned.reset_ports(Arc::new(PortMap::new()));
    }
}
