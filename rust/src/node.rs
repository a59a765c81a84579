//! Node implementations for BTree.
//!
//! Node-local primitives only: binary search over the entries and positional
//! insertion/removal of entries and children. Nothing here knows about the
//! minimum degree invariants beyond reporting occupancy; the tree-level
//! algorithms decide when to call what.

use crate::error::BTreeError;
use crate::ordering::Comparator;
use crate::types::{Entry, Node, NodeId};

// ============================================================================
// ENTRY
// ============================================================================

impl<K, V> Entry<K, V> {
    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    pub fn value_mut(&mut self) -> &mut V {
        &mut self.value
    }

    /// Replace the value, returning the previous one.
    pub fn set_value(&mut self, value: V) -> V {
        std::mem::replace(&mut self.value, value)
    }

    pub fn into_value(self) -> V {
        self.value
    }

    pub fn into_parts(self) -> (K, V) {
        (self.key, self.value)
    }
}

// ============================================================================
// NODE
// ============================================================================

impl<K, V> Node<K, V> {
    // ============================================================================
    // SEARCH
    // ============================================================================

    /// Binary search for `key` among this node's entries.
    ///
    /// `Ok(index)` is the position of the matching entry. `Err(index)` is where
    /// the key would be inserted, which for an internal node is also the index
    /// of the only child whose subtree can contain it.
    #[inline]
    pub fn search<C: Comparator<K>>(&self, key: &K, comparator: &C) -> Result<usize, usize> {
        self.entries
            .binary_search_by(|entry| comparator.compare(&entry.key, key))
    }

    // ============================================================================
    // ENTRY OPERATIONS
    // ============================================================================

    pub fn entry_at(&self, index: usize) -> &Entry<K, V> {
        &self.entries[index]
    }

    /// Insert an entry at an explicit position.
    ///
    /// The caller has already searched for the position, so ordering and
    /// uniqueness are its responsibility.
    pub fn insert_entry_at(&mut self, index: usize, entry: Entry<K, V>) {
        self.entries.insert(index, entry);
    }

    /// Remove and return the entry at `index`.
    pub fn remove_entry(&mut self, index: usize) -> Entry<K, V> {
        self.entries.remove(index)
    }

    /// Swap the entry at `index` for `entry`, returning the old one.
    pub fn replace_entry(&mut self, index: usize, entry: Entry<K, V>) -> Entry<K, V> {
        std::mem::replace(&mut self.entries[index], entry)
    }

    /// Search-then-insert. Returns `false`, leaving the node untouched, when the
    /// key is already present.
    pub fn insert_entry<C: Comparator<K>>(&mut self, entry: Entry<K, V>, comparator: &C) -> bool {
        match self.search(&entry.key, comparator) {
            Ok(_) => false,
            Err(index) => {
                self.insert_entry_at(index, entry);
                true
            }
        }
    }

    /// Search-then-upsert. Returns the previous value when the key was present.
    pub fn put_entry<C: Comparator<K>>(&mut self, entry: Entry<K, V>, comparator: &C) -> Option<V> {
        match self.search(&entry.key, comparator) {
            Ok(index) => Some(self.entries[index].set_value(entry.value)),
            Err(index) => {
                self.insert_entry_at(index, entry);
                None
            }
        }
    }

    // ============================================================================
    // CHILD OPERATIONS
    // ============================================================================

    /// The child at `index`.
    ///
    /// # Panics
    ///
    /// Panics when called on a leaf. The tree algorithms only descend from
    /// internal nodes, so this is a broken invariant, not a user error.
    #[inline]
    pub fn child_at(&self, index: usize) -> NodeId {
        if self.is_leaf {
            panic!("{}", BTreeError::NodeError("leaf node has no children".to_string()));
        }
        self.children[index]
    }

    pub fn insert_child(&mut self, index: usize, child: NodeId) {
        self.children.insert(index, child);
    }

    pub fn remove_child(&mut self, index: usize) -> NodeId {
        self.children.remove(index)
    }

    // ============================================================================
    // STATUS CHECKS
    // ============================================================================

    /// Number of entries in this node.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns true if this node holds `2t - 1` entries and must split before
    /// an insert may enter it.
    pub fn is_full(&self, min_degree: usize) -> bool {
        self.entries.len() >= 2 * min_degree - 1
    }

    /// Returns true if this node holds at least `t` entries, so a delete may
    /// enter it (or take an entry from it) without rebalancing first.
    pub fn can_donate(&self, min_degree: usize) -> bool {
        self.entries.len() >= min_degree
    }
}
