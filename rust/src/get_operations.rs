//! GET operations for BTree.
//!
//! This module contains the read operations: a single root-to-leaf descent
//! that stops early when the key is met in an internal node.

use crate::ordering::Comparator;
use crate::types::{BTree, NodeId};

impl<K, V, C: Comparator<K>> BTree<K, V, C> {
    // ============================================================================
    // PUBLIC GET OPERATIONS
    // ============================================================================

    /// Get a reference to the value associated with a key.
    ///
    /// # Returns
    ///
    /// A reference to the value if the key exists, `None` otherwise.
    ///
    /// # Examples
    ///
    /// ```
    /// use mwaytree::BTree;
    ///
    /// let mut tree = BTree::new(2).unwrap();
    /// tree.insert(1, "one");
    /// assert_eq!(tree.search(&1), Some(&"one"));
    /// assert_eq!(tree.search(&2), None);
    /// ```
    pub fn search(&self, key: &K) -> Option<&V> {
        let (node_id, index) = self.locate(key)?;
        Some(self.nodes.slot(node_id).entry_at(index).value())
    }

    /// Alias for [`BTree::search`].
    pub fn get(&self, key: &K) -> Option<&V> {
        self.search(key)
    }

    /// Check if key exists in the tree.
    pub fn contains_key(&self, key: &K) -> bool {
        self.locate(key).is_some()
    }

    /// Get a mutable reference to the value for a key.
    ///
    /// # Examples
    ///
    /// ```
    /// use mwaytree::BTree;
    ///
    /// let mut tree = BTree::new(2).unwrap();
    /// tree.insert(1, "one");
    /// if let Some(value) = tree.get_mut(&1) {
    ///     *value = "ONE";
    /// }
    /// assert_eq!(tree.search(&1), Some(&"ONE"));
    /// ```
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let (node_id, index) = self.locate(key)?;
        Some(&mut self.nodes.slot_mut(node_id).entries[index].value)
    }

    // ============================================================================
    // HELPERS FOR GET OPERATIONS
    // ============================================================================

    /// Find the node and entry position holding `key`.
    ///
    /// Each level either finds the key or yields the child index to follow; a
    /// miss at a leaf ends the search.
    pub(crate) fn locate(&self, key: &K) -> Option<(NodeId, usize)> {
        let mut node_id = self.root;
        loop {
            let node = self.nodes.slot(node_id);
            match node.search(key, &self.comparator) {
                Ok(index) => return Some((node_id, index)),
                Err(_) if node.is_leaf => return None,
                Err(index) => node_id = node.child_at(index),
            }
        }
    }
}
