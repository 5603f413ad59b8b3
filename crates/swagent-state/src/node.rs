//! The publish contract shared by every entity in the state tree.
//!
//! A node starts life unpublished and writable by its single owner. When a
//! new root is handed to the current-root slot, [`Node::publish`] deep-marks
//! the root and everything reachable from it. From that point on the
//! subtree is immutable forever and may be shared freely across
//! generations and reader threads.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Per-node publish flag.
///
/// Embedded in every node type. `Clone` deliberately resets the flag: a
/// cloned node is a fresh, writable instance regardless of whether its
/// source was already published.
#[derive(Debug, Default)]
pub struct NodeBase {
    published: AtomicBool,
}

impl NodeBase {
    /// Creates an unpublished node base.
    pub fn new() -> Self {
        NodeBase {
            published: AtomicBool::new(false),
        }
    }

    /// Returns true once the owning node has been published.
    pub fn is_published(&self) -> bool {
        self.published.load(Ordering::Acquire)
    }

    /// Marks the owning node published.
    ///
    /// Called from [`Node::publish`] implementations only; publication
    /// always starts at the root and fans out to every reachable child.
    pub fn mark_published(&self) {
        self.published.store(true, Ordering::Release);
    }
}

impl Clone for NodeBase {
    fn clone(&self) -> Self {
        NodeBase::new()
    }
}

impl PartialEq for NodeBase {
    /// The publish flag is bookkeeping, not value: node equality is
    /// payload equality, so all bases compare equal.
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for NodeBase {}

/// An entity participating in the state tree.
///
/// Publication is idempotent and deep: publishing a node marks every
/// reachable descendant as well. Once published, a node must never be
/// mutated in place; the copy-on-write helpers on
/// [`SwitchState`](crate::SwitchState) are the supported way to produce a
/// writable replacement.
pub trait Node: fmt::Debug + Send + Sync {
    /// Returns true once this node has been published.
    fn is_published(&self) -> bool;

    /// Deep-marks this node and everything reachable from it published.
    fn publish(&self);
}

/// Panics if `published` is set.
///
/// Mutating a published node is a structural invariant violation: a
/// programming error, not a recoverable condition.
#[track_caller]
pub(crate) fn check_unpublished(published: bool, what: &str) {
    if published {
        panic!("structural invariant violated: attempted to mutate published {what}");
    }
}

/// Returns a writable reference to an unpublished node behind an `Arc`.
///
/// Panics if the node is shared: an unpublished node has exactly one owner,
/// so shared ownership here means the copy-on-write discipline was broken.
#[track_caller]
pub(crate) fn arc_writable<'a, T>(arc: &'a mut Arc<T>, what: &str) -> &'a mut T {
    match Arc::get_mut(arc) {
        Some(node) => node,
        None => panic!("structural invariant violated: unpublished {what} has multiple owners"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_starts_unpublished() {
        let base = NodeBase::new();
        assert!(!base.is_published());
        base.mark_published();
        assert!(base.is_published());
    }

    #[test]
    fn test_clone_resets_publish_flag() {
        let base = NodeBase::new();
        base.mark_published();
        let fresh = base.clone();
        assert!(!fresh.is_published());
    }

    #[test]
    #[should_panic(expected = "structural invariant violated")]
    fn test_check_unpublished_panics_on_published() {
        check_unpublished(true, "test node");
    }

    #[test]
    #[should_panic(expected = "multiple owners")]
    fn test_arc_writable_panics_on_shared_node() {
        let mut shared: Arc<u32> = Arc::new(1);
        let _other = Arc::clone(&shared);
        arc_writable(&mut shared, "test node");
    }
}
