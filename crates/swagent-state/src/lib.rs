//! Versioned, immutable-once-published switch state tree.
//!
//! This crate is the in-memory state core of the switch agent. It holds the
//! running configuration as a tree of nodes that is built copy-on-write and
//! frozen ("published") before it becomes visible to readers:
//!
//! - [`Node`] / [`NodeBase`]: the publish contract every tree entity carries
//! - [`NodeMap`]: ordered, key-unique collection of shared nodes
//! - [`NodeMapDelta`]: merge-walk diff of two map snapshots
//! - [`SwitchState`]: the root aggregate, one map per domain
//! - [`StateDelta`]: per-domain deltas between two roots
//! - [`StateManager`]: the process-wide current-root slot
//!
//! # Concurrency model
//!
//! One writer evolves the tree; any number of readers traverse it. A writer
//! clones the root-to-target path, builds the new generation, publishes it
//! (deep-marking every reachable node immutable), and swaps the current-root
//! pointer atomically. Readers grab the current root once and then walk it
//! without any locking: published subtrees never change, so a reader that
//! captured the previous root keeps seeing a fully consistent tree.
//!
//! # Change detection
//!
//! [`NodeMapDelta`] decides "changed" by *instance identity*
//! ([`std::sync::Arc::ptr_eq`]), never by field comparison. Deep equality is
//! too expensive for the hardware-sync hot path, so the burden moves to
//! producers of new state: whenever a rebuilt node is value-equal to the one
//! it replaces, the producer must put the original instance into the new
//! tree. The configuration appliers in the daemon crate implement exactly
//! that discipline.

mod acl;
mod delta;
mod error;
mod lb;
mod manager;
mod map;
mod node;
mod port;
mod route;
mod state_delta;
mod switch_state;

pub use acl::AclEntry;
pub use delta::{DeltaEntry, NodeMapDelta};
pub use error::{StateError, StateResult};
pub use lb::LoadBalancer;
pub use manager::StateManager;
pub use map::NodeMap;
pub use node::{Node, NodeBase};
pub use port::Port;
pub use route::Route;
pub use state_delta::StateDelta;
pub use switch_state::{AclMap, LoadBalancerMap, PortMap, RouteMap, SwitchState};
