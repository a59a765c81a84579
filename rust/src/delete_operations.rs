//! DELETE operations for BTree.
//!
//! This module contains the deletion operations: entry removal, predecessor and
//! successor substitution, sibling borrowing, node merging and root collapse.
//!
//! The descent is single-pass. Before it enters any non-root node, that node
//! is guaranteed to hold at least `t` entries, either because it already did or
//! because an entry was rotated in from a sibling or the node was merged with
//! one. A removal at the bottom can therefore never underflow anything, and no
//! fix-up walks back up the tree.

use crate::error::BTreeError;
use crate::ordering::Comparator;
use crate::types::{BTree, Entry, Node, NodeId};

/// What a delete descent is looking for.
enum DeleteTarget<'a, K> {
    Key(&'a K),
    /// Largest entry of the subtree: the in-order predecessor of a separator.
    Max,
    /// Smallest entry of the subtree: the in-order successor of a separator.
    Min,
}

impl<K> Clone for DeleteTarget<'_, K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for DeleteTarget<'_, K> {}

impl<K> DeleteTarget<'_, K> {
    /// Node-local search for the target, with the same meaning as
    /// [`Node::search`]: `Ok` is a hit, `Err` is the child to descend into.
    ///
    /// The extremes are only ever found in a leaf.
    fn locate<V, C: Comparator<K>>(self, node: &Node<K, V>, comparator: &C) -> Result<usize, usize> {
        match self {
            DeleteTarget::Key(key) => node.search(key, comparator),
            DeleteTarget::Max if node.is_leaf => node.len().checked_sub(1).ok_or(0),
            DeleteTarget::Max => Err(node.len()),
            DeleteTarget::Min if node.is_leaf && !node.is_empty() => Ok(0),
            DeleteTarget::Min => Err(0),
        }
    }
}

impl<K, V, C: Comparator<K>> BTree<K, V, C> {
    // ============================================================================
    // PUBLIC DELETE OPERATIONS
    // ============================================================================

    /// Remove a key from the tree, returning the removed entry.
    ///
    /// Deleting an absent key returns `None` and leaves the tree untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use mwaytree::BTree;
    ///
    /// let mut tree = BTree::new(2).unwrap();
    /// tree.insert(1, "one");
    /// let removed = tree.delete(&1).unwrap();
    /// assert_eq!((*removed.key(), *removed.value()), (1, "one"));
    /// assert!(tree.delete(&1).is_none());
    /// ```
    pub fn delete(&mut self, key: &K) -> Option<Entry<K, V>> {
        if !self.contains_key(key) {
            tracing::trace!("delete: key not present");
            return None;
        }
        self.delete_from(self.root, DeleteTarget::Key(key))
    }

    /// Remove a key from the tree, returning only its value.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.delete(key).map(Entry::into_value)
    }

    // ============================================================================
    // HELPERS FOR DELETE OPERATIONS
    // ============================================================================

    /// Delete `target` from the subtree rooted at `node_id`.
    ///
    /// Unless `node_id` is the root, the node holds at least `t` entries.
    fn delete_from(&mut self, node_id: NodeId, target: DeleteTarget<'_, K>) -> Option<Entry<K, V>> {
        let node = self.nodes.slot(node_id);
        debug_assert!(
            node_id == self.root || node.can_donate(self.min_degree),
            "delete entered node {} holding only {} entries",
            node_id,
            node.len()
        );

        match (target.locate(node, &self.comparator), node.is_leaf) {
            // Found in a leaf: remove directly.
            (Ok(index), true) => Some(self.nodes.slot_mut(node_id).remove_entry(index)),
            (Ok(index), false) => self.delete_internal_entry(node_id, index, target),
            (Err(_), true) => None,
            (Err(index), false) => {
                let child_id = self.prepare_child(node_id, index);
                self.delete_from(child_id, target)
            }
        }
    }

    /// The target sits at `index` of internal node `node_id`.
    fn delete_internal_entry(
        &mut self,
        node_id: NodeId,
        index: usize,
        target: DeleteTarget<'_, K>,
    ) -> Option<Entry<K, V>> {
        let t = self.min_degree;
        let node = self.nodes.slot(node_id);
        let left_id = node.child_at(index);
        let right_id = node.child_at(index + 1);

        if self.nodes.slot(left_id).can_donate(t) {
            let predecessor = self.take_extreme(left_id, DeleteTarget::Max);
            return Some(self.nodes.slot_mut(node_id).replace_entry(index, predecessor));
        }

        if self.nodes.slot(right_id).can_donate(t) {
            let successor = self.take_extreme(right_id, DeleteTarget::Min);
            return Some(self.nodes.slot_mut(node_id).replace_entry(index, successor));
        }

        // Both neighbours are minimal: fold the entry and the right child into
        // the left child and keep looking there.
        let merged_id = self.merge_children(node_id, index);
        self.collapse_root_if_empty(node_id, merged_id);
        self.delete_from(merged_id, target)
    }

    /// Remove the predecessor or successor from a subtree with a spare entry.
    fn take_extreme(&mut self, subtree_id: NodeId, target: DeleteTarget<'_, K>) -> Entry<K, V> {
        match self.delete_from(subtree_id, target) {
            Some(entry) => entry,
            None => panic!(
                "{}",
                BTreeError::data_integrity("delete", "subtree next to a separator is empty")
            ),
        }
    }

    /// Make sure the child at `index` of `node_id` can be entered, returning
    /// the id of the node the descent continues into.
    ///
    /// A minimal child first borrows from its right sibling, then from its left
    /// sibling. Failing both, it is merged with its right sibling if it has one,
    /// otherwise with its left sibling.
    fn prepare_child(&mut self, node_id: NodeId, index: usize) -> NodeId {
        let t = self.min_degree;
        let node = self.nodes.slot(node_id);
        let child_id = node.child_at(index);
        if self.nodes.slot(child_id).can_donate(t) {
            return child_id;
        }

        let right_sibling = (index < node.len()).then(|| node.child_at(index + 1));
        let left_sibling = index.checked_sub(1).map(|left| node.child_at(left));

        if right_sibling.is_some_and(|id| self.nodes.slot(id).can_donate(t)) {
            self.rotate_from_right(node_id, index);
            return child_id;
        }
        if left_sibling.is_some_and(|id| self.nodes.slot(id).can_donate(t)) {
            self.rotate_from_left(node_id, index);
            return child_id;
        }

        let merged_id = if right_sibling.is_some() {
            self.merge_children(node_id, index)
        } else {
            self.merge_children(node_id, index - 1)
        };
        self.collapse_root_if_empty(node_id, merged_id);
        merged_id
    }

    /// Rotate one entry from the right sibling of child `index`, through the
    /// parent, into the end of the child.
    fn rotate_from_right(&mut self, parent_id: NodeId, index: usize) {
        let parent = self.nodes.slot(parent_id);
        let child_id = parent.child_at(index);
        let sibling_id = parent.child_at(index + 1);

        let sibling = self.nodes.slot_mut(sibling_id);
        let lifted = sibling.remove_entry(0);
        let moved_child = (!sibling.is_leaf).then(|| sibling.remove_child(0));

        let lowered = self.nodes.slot_mut(parent_id).replace_entry(index, lifted);

        let child = self.nodes.slot_mut(child_id);
        let end = child.len();
        child.insert_entry_at(end, lowered);
        if let Some(grandchild) = moved_child {
            let end = child.children.len();
            child.insert_child(end, grandchild);
        }
        tracing::trace!(parent = parent_id, child = child_id, sibling = sibling_id, "borrowed from right sibling");
    }

    /// Rotate one entry from the left sibling of child `index`, through the
    /// parent, into the front of the child.
    fn rotate_from_left(&mut self, parent_id: NodeId, index: usize) {
        let parent = self.nodes.slot(parent_id);
        let child_id = parent.child_at(index);
        let sibling_id = parent.child_at(index - 1);

        let sibling = self.nodes.slot_mut(sibling_id);
        let lifted = sibling.remove_entry(sibling.len() - 1);
        let moved_child = (!sibling.is_leaf).then(|| sibling.remove_child(sibling.children.len() - 1));

        let lowered = self.nodes.slot_mut(parent_id).replace_entry(index - 1, lifted);

        let child = self.nodes.slot_mut(child_id);
        child.insert_entry_at(0, lowered);
        if let Some(grandchild) = moved_child {
            child.insert_child(0, grandchild);
        }
        tracing::trace!(parent = parent_id, child = child_id, sibling = sibling_id, "borrowed from left sibling");
    }

    /// Merge child `left_index + 1` of `parent_id` into child `left_index`,
    /// pulling the separating entry down between them. The absorbed node is
    /// freed. Returns the id of the merged node.
    fn merge_children(&mut self, parent_id: NodeId, left_index: usize) -> NodeId {
        let parent = self.nodes.slot_mut(parent_id);
        let separator = parent.remove_entry(left_index);
        let right_id = parent.remove_child(left_index + 1);
        let left_id = parent.child_at(left_index);

        let right = match self.nodes.deallocate(right_id) {
            Some(node) => node,
            None => panic!("{}", BTreeError::node_error(right_id, "merged sibling is not allocated")),
        };

        let left = self.nodes.slot_mut(left_id);
        left.entries.push(separator);
        left.entries.extend(right.entries);
        left.children.extend(right.children);
        tracing::trace!(parent = parent_id, merged = left_id, absorbed = right_id, "merged siblings");

        left_id
    }

    /// If a merge emptied the root, its only child becomes the new root.
    ///
    /// This is the only place the tree loses height.
    fn collapse_root_if_empty(&mut self, node_id: NodeId, merged_id: NodeId) {
        if node_id != self.root || !self.nodes.slot(node_id).is_empty() {
            return;
        }
        self.nodes.deallocate(node_id);
        self.root = merged_id;
        tracing::debug!(root = merged_id, "tree shrank by one level");
    }
}

#[cfg(test)]
mod tests {
    use crate::types::BTree;

    fn node_keys(tree: &BTree<i32, i32>, id: u32) -> Vec<i32> {
        tree.nodes
            .slot(id)
            .entries
            .iter()
            .map(|entry| *entry.key())
            .collect()
    }

    fn child_keys(tree: &BTree<i32, i32>, id: u32) -> Vec<Vec<i32>> {
        tree.nodes
            .slot(id)
            .children
            .iter()
            .map(|&child| node_keys(tree, child))
            .collect()
    }

    /// Root `[2]` with leaves `[1]` and `[3, 4]`.
    fn small_tree() -> BTree<i32, i32> {
        let mut tree = BTree::new(2).unwrap();
        for key in 1..=4 {
            tree.insert(key, key * 10);
        }
        tree
    }

    /// Root `[2]` with leaves `[1]` and `[3]`.
    fn minimal_tree() -> BTree<i32, i32> {
        let mut tree = small_tree();
        tree.delete(&4).unwrap();
        assert_eq!(child_keys(&tree, tree.root), vec![vec![1], vec![3]]);
        tree
    }

    /// Root `[2]` with leaves `[0, 1]` and `[3]`.
    fn left_heavy_tree() -> BTree<i32, i32> {
        let mut tree = minimal_tree();
        tree.insert(0, 0);
        assert_eq!(child_keys(&tree, tree.root), vec![vec![0, 1], vec![3]]);
        tree
    }

    #[test]
    fn test_delete_from_leaf_root() {
        let mut tree = BTree::new(2).unwrap();
        tree.insert(1, 10);
        tree.insert(2, 20);
        let removed = tree.delete(&1).unwrap();
        assert_eq!(removed.into_parts(), (1, 10));
        assert_eq!(node_keys(&tree, tree.root), vec![2]);
    }

    #[test]
    fn test_delete_internal_uses_successor_when_left_is_minimal() {
        let mut tree = small_tree();
        let removed = tree.delete(&2).unwrap();
        assert_eq!(removed.into_parts(), (2, 20));

        assert_eq!(node_keys(&tree, tree.root), vec![3]);
        assert_eq!(child_keys(&tree, tree.root), vec![vec![1], vec![4]]);
        assert_eq!(tree.search(&3), Some(&30));
        tree.validate().unwrap();
    }

    #[test]
    fn test_delete_internal_uses_predecessor_when_left_can_donate() {
        let mut tree = left_heavy_tree();
        assert_eq!(tree.remove(&2), Some(20));

        assert_eq!(node_keys(&tree, tree.root), vec![1]);
        assert_eq!(child_keys(&tree, tree.root), vec![vec![0], vec![3]]);
        tree.validate().unwrap();
    }

    #[test]
    fn test_delete_internal_merges_minimal_children_and_collapses_root() {
        let mut tree = minimal_tree();
        assert_eq!(tree.remove(&2), Some(20));

        assert!(tree.nodes.slot(tree.root).is_leaf);
        assert_eq!(node_keys(&tree, tree.root), vec![1, 3]);
        assert_eq!(tree.nodes.len(), 1);
        tree.validate().unwrap();
    }

    #[test]
    fn test_descent_borrows_from_right_sibling() {
        let mut tree = small_tree();
        assert_eq!(tree.remove(&1), Some(10));

        assert_eq!(node_keys(&tree, tree.root), vec![3]);
        assert_eq!(child_keys(&tree, tree.root), vec![vec![2], vec![4]]);
        tree.validate().unwrap();
    }

    #[test]
    fn test_descent_borrows_from_left_sibling() {
        let mut tree = left_heavy_tree();
        assert_eq!(tree.remove(&3), Some(30));

        assert_eq!(node_keys(&tree, tree.root), vec![1]);
        assert_eq!(child_keys(&tree, tree.root), vec![vec![0], vec![2]]);
        tree.validate().unwrap();
    }

    #[test]
    fn test_descent_prefers_right_sibling_for_borrow() {
        // Root [2, 4] over [0, 1], [3], [5, 6]: both neighbours of [3] can
        // donate and the right one is used.
        let mut tree = BTree::new(2).unwrap();
        for key in 1..=6 {
            tree.insert(key, key * 10);
        }
        tree.insert(0, 0);
        assert_eq!(node_keys(&tree, tree.root), vec![2, 4]);
        assert_eq!(child_keys(&tree, tree.root), vec![vec![0, 1], vec![3], vec![5, 6]]);

        tree.remove(&3);
        assert_eq!(node_keys(&tree, tree.root), vec![2, 5]);
        assert_eq!(child_keys(&tree, tree.root), vec![vec![0, 1], vec![4], vec![6]]);
        tree.validate().unwrap();
    }

    #[test]
    fn test_descent_merges_with_right_sibling_and_collapses_root() {
        let mut tree = minimal_tree();
        assert_eq!(tree.remove(&1), Some(10));

        assert!(tree.nodes.slot(tree.root).is_leaf);
        assert_eq!(node_keys(&tree, tree.root), vec![2, 3]);
        assert_eq!(tree.nodes.len(), 1);
    }

    #[test]
    fn test_descent_merges_last_child_with_left_sibling() {
        let mut tree = minimal_tree();
        assert_eq!(tree.remove(&3), Some(30));

        assert!(tree.nodes.slot(tree.root).is_leaf);
        assert_eq!(node_keys(&tree, tree.root), vec![1, 2]);
    }

    #[test]
    fn test_successor_comes_from_bottom_of_right_subtree() {
        // Root [4] over [2] ([1], [3]) and [6, 8] ([5], [7], [9, 10]).
        let mut tree = BTree::new(2).unwrap();
        for key in 1..=10 {
            tree.insert(key, key * 10);
        }
        assert_eq!(tree.remove(&4), Some(40));

        assert_eq!(node_keys(&tree, tree.root), vec![5]);
        let root = tree.nodes.slot(tree.root);
        let (left, right) = (root.child_at(0), root.child_at(1));
        assert_eq!(node_keys(&tree, left), vec![2]);
        assert_eq!(node_keys(&tree, right), vec![8]);
        assert_eq!(child_keys(&tree, right), vec![vec![6, 7], vec![9, 10]]);
        tree.validate().unwrap();
    }

    #[test]
    fn test_predecessor_comes_from_bottom_of_left_subtree() {
        let mut tree = BTree::new(2).unwrap();
        for key in (1..=10).rev() {
            tree.insert(key, key * 10);
        }
        assert_eq!(node_keys(&tree, tree.root), vec![7]);
        let left = tree.nodes.slot(tree.root).child_at(0);
        assert_eq!(node_keys(&tree, left), vec![3, 5]);
        assert_eq!(child_keys(&tree, left), vec![vec![1, 2], vec![4], vec![6]]);

        // The left child [3, 5] can donate, but its own last entry is not the
        // predecessor of 7; 6 at the bottom of its subtree is.
        assert_eq!(tree.remove(&7), Some(70));

        assert_eq!(node_keys(&tree, tree.root), vec![6]);
        let root = tree.nodes.slot(tree.root);
        let (left, right) = (root.child_at(0), root.child_at(1));
        assert_eq!(node_keys(&tree, left), vec![3]);
        assert_eq!(child_keys(&tree, left), vec![vec![1, 2], vec![4, 5]]);
        assert_eq!(node_keys(&tree, right), vec![9]);
        assert_eq!(child_keys(&tree, right), vec![vec![8], vec![10]]);
        assert_eq!(tree.search(&5), Some(&50));
        tree.validate().unwrap();
    }

    #[test]
    fn test_delete_missing_key_leaves_structure_alone() {
        let mut tree = minimal_tree();
        let nodes_before = tree.nodes.len();
        assert!(tree.delete(&42).is_none());
        assert!(tree.delete(&0).is_none());
        assert_eq!(tree.nodes.len(), nodes_before);
        assert_eq!(node_keys(&tree, tree.root), vec![2]);
        assert_eq!(child_keys(&tree, tree.root), vec![vec![1], vec![3]]);
    }

    #[test]
    fn test_delete_everything_returns_to_empty_leaf_root() {
        let mut tree = BTree::new(3).unwrap();
        for key in 0..500 {
            tree.insert((key * 7919) % 500, key);
        }
        for key in (0..500).rev() {
            assert!(tree.delete(&key).is_some(), "key {}", key);
            if key % 50 == 0 {
                tree.validate().unwrap();
            }
        }
        let root = tree.nodes.slot(tree.root);
        assert!(root.is_leaf);
        assert!(root.is_empty());
        assert_eq!(tree.nodes.len(), 1);
    }

    #[test]
    fn test_delete_with_reverse_comparator() {
        let mut tree = BTree::with_comparator(2, |a: &i32, b: &i32| b.cmp(a)).unwrap();
        for key in 0..40 {
            tree.insert(key, key);
        }
        for key in (0..40).step_by(3) {
            assert_eq!(tree.remove(&key), Some(key));
        }
        for key in 0..40 {
            assert_eq!(tree.search(&key).is_some(), key % 3 != 0);
        }
        tree.validate().unwrap();
    }
}
