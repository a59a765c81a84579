//! Tree structure management operations for BTree.
//!
//! This module contains tree-level operations that manage the overall
//! structure: emptiness, clearing and the occupancy bounds derived from `t`.

use crate::types::{BTree, Node};

// ============================================================================
// TREE STRUCTURE OPERATIONS
// ============================================================================

impl<K, V, C> BTree<K, V, C> {
    /// Returns true if the tree holds no entries.
    ///
    /// Only the root can be empty, and only while it is a leaf.
    pub fn is_empty(&self) -> bool {
        self.nodes.slot(self.root).is_empty()
    }

    /// Remove every entry, leaving a single empty leaf as root.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = self.nodes.allocate(Node::new_leaf(self.min_degree));
    }

    /// The minimum degree `t` this tree was built with.
    pub fn min_degree(&self) -> usize {
        self.min_degree
    }

    /// Most entries any node may hold: `2t - 1`.
    pub fn max_entries(&self) -> usize {
        2 * self.min_degree - 1
    }

    /// Fewest entries a non-root node may hold: `t - 1`.
    pub fn min_entries(&self) -> usize {
        self.min_degree - 1
    }
}
