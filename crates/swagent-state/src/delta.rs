//! Merge-walk diff of two node map snapshots.

use std::collections::btree_map;
use std::iter::Peekable;
use std::sync::Arc;

use crate::map::NodeMap;

/// One entry of a [`NodeMapDelta`] walk.
///
/// For a key present in both snapshots the classification is decided by
/// *instance identity*: the entry is `Changed` iff the old and new `Arc`s
/// are different allocations. Two nodes with identical field contents but
/// different identity are still reported as `Changed` — keeping that from
/// happening is the producer's job, not the diff engine's.
#[derive(Debug)]
pub enum DeltaEntry<'a, K, V> {
    /// Key exists only in the new snapshot.
    Added { key: &'a K, node: &'a Arc<V> },
    /// Key exists only in the old snapshot.
    Removed { key: &'a K, node: &'a Arc<V> },
    /// Key exists in both snapshots with different node instances.
    Changed {
        key: &'a K,
        old: &'a Arc<V>,
        new: &'a Arc<V>,
    },
    /// Key exists in both snapshots with the same node instance.
    Unchanged { key: &'a K, node: &'a Arc<V> },
}

impl<'a, K, V> DeltaEntry<'a, K, V> {
    /// Returns the key this entry is about.
    pub fn key(&self) -> &'a K {
        match *self {
            DeltaEntry::Added { key, .. }
            | DeltaEntry::Removed { key, .. }
            | DeltaEntry::Changed { key, .. }
            | DeltaEntry::Unchanged { key, .. } => key,
        }
    }

    /// Returns true unless the entry is `Unchanged`.
    pub fn is_change(&self) -> bool {
        !matches!(self, DeltaEntry::Unchanged { .. })
    }
}

/// Lazy diff over two map snapshots.
///
/// A single merge walk over both ascending key sequences, O(n + m), yielding
/// one [`DeltaEntry`] per key present in either snapshot. The walk is an
/// ordinary consuming iterator: finite, and not restartable once exhausted.
///
/// Both snapshots are expected to be published; diffing a map that is still
/// being mutated by its writer has no meaningful answer.
pub struct NodeMapDelta<'a, K, V> {
    old: Peekable<btree_map::Iter<'a, K, Arc<V>>>,
    new: Peekable<btree_map::Iter<'a, K, Arc<V>>>,
}

enum Advance {
    OldOnly,
    NewOnly,
    Both,
}

impl<'a, K: Ord, V> NodeMapDelta<'a, K, V> {
    /// Creates a delta walk from `old` to `new`.
    pub fn new(old: &'a NodeMap<K, V>, new: &'a NodeMap<K, V>) -> Self {
        NodeMapDelta {
            old: old.nodes.iter().peekable(),
            new: new.nodes.iter().peekable(),
        }
    }
}

impl<'a, K: Ord, V> Iterator for NodeMapDelta<'a, K, V> {
    type Item = DeltaEntry<'a, K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        let advance = match (self.old.peek(), self.new.peek()) {
            (None, None) => return None,
            (Some(_), None) => Advance::OldOnly,
            (None, Some(_)) => Advance::NewOnly,
            (Some((old_key, _)), Some((new_key, _))) => match old_key.cmp(new_key) {
                std::cmp::Ordering::Less => Advance::OldOnly,
                std::cmp::Ordering::Greater => Advance::NewOnly,
                std::cmp::Ordering::Equal => Advance::Both,
            },
        };

        match advance {
            Advance::OldOnly => self
                .old
                .next()
                .map(|(key, node)| DeltaEntry::Removed { key, node }),
            Advance::NewOnly => self
                .new
                .next()
                .map(|(key, node)| DeltaEntry::Added { key, node }),
            Advance::Both => {
                let (key, old) = self.old.next()?;
                let (_, new) = self.new.next()?;
                if Arc::ptr_eq(old, new) {
                    Some(DeltaEntry::Unchanged { key, node: new })
                } else {
                    Some(DeltaEntry::Changed { key, old, new })
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{Node, NodeBase};
    use pretty_assertions::assert_eq;

    #[derive(Debug, PartialEq)]
    struct TestNode {
        base: NodeBase,
        value: u32,
    }

    impl TestNode {
        fn new(value: u32) -> Arc<Self> {
            Arc::new(TestNode {
                base: NodeBase::new(),
                value,
            })
        }
    }

    impl Node for TestNode {
        fn is_published(&self) -> bool {
            self.base.is_published()
        }

        fn publish(&self) {
            self.base.mark_published();
        }
    }

    fn map_of(entries: Vec<(u32, Arc<TestNode>)>) -> NodeMap<u32, TestNode> {
        let mut map = NodeMap::new();
        for (key, node) in entries {
            map.insert(key, node).unwrap();
        }
        map.publish();
        map
    }

    #[test]
    fn test_partition_of_keys() {
        let shared = TestNode::new(2);
        let old = map_of(vec![
            (1, TestNode::new(1)),
            (2, Arc::clone(&shared)),
            (3, TestNode::new(3)),
        ]);
        let new = map_of(vec![
            (2, Arc::clone(&shared)),
            (3, TestNode::new(30)),
            (4, TestNode::new(4)),
        ]);

        let (mut added, mut removed, mut changed, mut unchanged) =
            (vec![], vec![], vec![], vec![]);
        for entry in NodeMapDelta::new(&old, &new) {
            match entry {
                DeltaEntry::Added { key, .. } => added.push(*key),
                DeltaEntry::Removed { key, .. } => removed.push(*key),
                DeltaEntry::Changed { key, .. } => changed.push(*key),
                DeltaEntry::Unchanged { key, .. } => unchanged.push(*key),
            }
        }

        assert_eq!(added, vec![4]);
        assert_eq!(removed, vec![1]);
        assert_eq!(changed, vec![3]);
        assert_eq!(unchanged, vec![2]);
    }

    #[test]
    fn test_identity_not_value_equality() {
        // Field-for-field identical nodes in different allocations must be
        // reported as changed.
        let old = map_of(vec![(1, TestNode::new(10))]);
        let new = map_of(vec![(1, TestNode::new(10))]);
        assert_eq!(*old.get_if(&1).unwrap(), *new.get_if(&1).unwrap());

        let entries: Vec<_> = NodeMapDelta::new(&old, &new).collect();
        assert_eq!(entries.len(), 1);
        assert!(matches!(entries[0], DeltaEntry::Changed { key: &1, .. }));
    }

    #[test]
    fn test_same_instance_is_unchanged() {
        let shared = TestNode::new(10);
        let old = map_of(vec![(1, Arc::clone(&shared))]);
        let new = map_of(vec![(1, Arc::clone(&shared))]);

        let entries: Vec<_> = NodeMapDelta::new(&old, &new).collect();
        assert!(matches!(entries[0], DeltaEntry::Unchanged { key: &1, .. }));
        assert!(!entries[0].is_change());
    }

    #[test]
    fn test_empty_maps_yield_nothing() {
        let old: NodeMap<u32, TestNode> = NodeMap::new();
        let new: NodeMap<u32, TestNode> = NodeMap::new();
        assert_eq!(NodeMapDelta::new(&old, &new).count(), 0);
    }

    #[test]
    fn test_entries_come_out_in_key_order() {
        let old = map_of(vec![(2, TestNode::new(2)), (5, TestNode::new(5))]);
        let new = map_of(vec![(1, TestNode::new(1)), (5, TestNode::new(50))]);

        let keys: Vec<u32> = NodeMapDelta::new(&old, &new)
            .map(|entry| *entry.key())
            .collect();
        assert_eq!(keys, vec![1, 2, 5]);
    }
}
