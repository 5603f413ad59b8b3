//! Ordered, key-unique collection of shared nodes.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::error::{StateError, StateResult};
use crate::node::{check_unpublished, Node, NodeBase};

/// A map from domain IDs to shared node instances; itself a node.
///
/// Keys are unique and iteration is always in ascending key order, so every
/// walk over a map (and every diff of two maps) is deterministic. Values
/// are held behind `Arc`: a node that did not change between two
/// generations is the *same allocation* in both maps, which is what the
/// delta engine's identity test relies on.
///
/// The API never auto-creates entries. `insert` on an existing key and
/// `remove` of a missing key are errors, not silent upserts.
#[derive(Debug)]
pub struct NodeMap<K, V> {
    base: NodeBase,
    pub(crate) nodes: BTreeMap<K, Arc<V>>,
}

impl<K: Ord, V> NodeMap<K, V> {
    /// Creates an empty, unpublished map.
    pub fn new() -> Self {
        NodeMap {
            base: NodeBase::new(),
            nodes: BTreeMap::new(),
        }
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns true if the map contains the given key.
    pub fn contains_key(&self, key: &K) -> bool {
        self.nodes.contains_key(key)
    }

    /// Returns the node for the given key, or `None` if absent.
    pub fn get_if(&self, key: &K) -> Option<&Arc<V>> {
        self.nodes.get(key)
    }

    /// Iterates over `(key, node)` pairs in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &Arc<V>)> {
        self.nodes.iter()
    }

    /// Iterates over keys in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.nodes.keys()
    }

    /// Inserts a node under a new key.
    ///
    /// Fails with [`StateError::DuplicateId`] if the key already exists.
    /// Panics if this map has been published.
    pub fn insert(&mut self, key: K, node: Arc<V>) -> StateResult<()>
    where
        K: fmt::Display,
    {
        check_unpublished(self.base.is_published(), "node map");
        match self.nodes.entry(key) {
            Entry::Occupied(occupied) => Err(StateError::duplicate_id(occupied.key())),
            Entry::Vacant(vacant) => {
                vacant.insert(node);
                Ok(())
            }
        }
    }

    /// Removes and returns the node under the given key.
    ///
    /// Fails with [`StateError::UnknownId`] if the key is absent.
    /// Panics if this map has been published.
    pub fn remove(&mut self, key: &K) -> StateResult<Arc<V>>
    where
        K: fmt::Display,
    {
        check_unpublished(self.base.is_published(), "node map");
        self.nodes
            .remove(key)
            .ok_or_else(|| StateError::unknown_id(key))
    }

    /// Creates a new unpublished map holding the given contents.
    ///
    /// The new map is independent of this one as an object, but shares the
    /// node instances referenced by `contents`. This is how an applier
    /// builds the next generation of a domain map while reusing every
    /// unchanged node.
    pub fn clone_with(&self, contents: BTreeMap<K, Arc<V>>) -> Self {
        NodeMap {
            base: NodeBase::new(),
            nodes: contents,
        }
    }
}

impl<K: Ord + Clone, V> Clone for NodeMap<K, V> {
    /// Shallow copy: the clone is unpublished and shares every node
    /// instance with the original.
    fn clone(&self) -> Self {
        NodeMap {
            base: NodeBase::new(),
            nodes: self.nodes.clone(),
        }
    }
}

impl<K: Ord, V> Default for NodeMap<K, V> {
    fn default() -> Self {
        NodeMap::new()
    }
}

impl<K, V> Node for NodeMap<K, V>
where
    K: Ord + fmt::Debug + Send + Sync,
    V: Node,
{
    fn is_published(&self) -> bool {
        self.base.is_published()
    }

    fn publish(&self) {
        self.base.mark_published();
        for node in self.nodes.values() {
            node.publish();
        }
    }
}
