//! Validation and debugging utilities for BTree.
//!
//! This module contains invariant checking, debugging utilities and test
//! helpers for the B-tree implementation.

use std::cmp::Ordering;
use std::fmt::Debug;

use crate::error::{BTreeError, BTreeResult, TreeResult};
use crate::ordering::Comparator;
use crate::types::{BTree, NodeId};

/// Bookkeeping carried through one validation walk.
struct WalkState {
    leaf_depth: Option<usize>,
    nodes_seen: usize,
}

// ============================================================================
// VALIDATION METHODS
// ============================================================================

impl<K, V, C: Comparator<K>> BTree<K, V, C> {
    /// Check if the tree maintains B-tree invariants.
    /// Returns true if all invariants are satisfied.
    pub fn check_invariants(&self) -> bool {
        self.validate().is_ok()
    }

    /// Check every structural invariant, reporting the first violation.
    ///
    /// Verified: leaf-ness matches the presence of children, internal nodes
    /// have one more child than entries, entries ascend strictly inside each
    /// node and within the bounds set by the parent's separators, occupancy
    /// stays within `t - 1 ..= 2t - 1` (the root may go lower, and is empty
    /// only as a leaf), all leaves share one depth, and the arena holds
    /// exactly the reachable nodes.
    pub fn validate(&self) -> BTreeResult<()> {
        let mut state = WalkState {
            leaf_depth: None,
            nodes_seen: 0,
        };
        self.check_node(self.root, None, None, 0, &mut state)?;
        self.check_in_order()?;
        self.check_arena_tree_consistency(state.nodes_seen)
    }

    /// Recursively check invariants for a node and its children.
    fn check_node(
        &self,
        node_id: NodeId,
        lower: Option<&K>,
        upper: Option<&K>,
        depth: usize,
        state: &mut WalkState,
    ) -> TreeResult<()> {
        let t = self.min_degree;
        let is_root = node_id == self.root;
        let node = self
            .nodes
            .get(node_id)
            .ok_or_else(|| BTreeError::node_error(node_id, "reachable but not allocated"))?;
        state.nodes_seen += 1;

        if node.is_leaf != node.children.is_empty() {
            return Err(BTreeError::data_integrity(
                "Shape",
                &format!(
                    "node {} is_leaf={} with {} children",
                    node_id,
                    node.is_leaf,
                    node.children.len()
                ),
            ));
        }
        if !node.is_leaf && node.children.len() != node.len() + 1 {
            return Err(BTreeError::data_integrity(
                "Shape",
                &format!(
                    "node {} has {} entries but {} children",
                    node_id,
                    node.len(),
                    node.children.len()
                ),
            ));
        }

        if node.len() > 2 * t - 1 {
            return Err(BTreeError::data_integrity(
                "Occupancy",
                &format!("node {} overflows with {} entries", node_id, node.len()),
            ));
        }
        if !is_root && node.len() < t - 1 {
            return Err(BTreeError::data_integrity(
                "Occupancy",
                &format!("node {} underflows with {} entries", node_id, node.len()),
            ));
        }
        if is_root && !node.is_leaf && node.is_empty() {
            return Err(BTreeError::data_integrity(
                "Occupancy",
                "internal root holds no entries",
            ));
        }

        for pair in node.entries.windows(2) {
            if self.comparator.compare(&pair[0].key, &pair[1].key) != Ordering::Less {
                return Err(BTreeError::data_integrity(
                    "Ordering",
                    &format!("node {} entries are not strictly ascending", node_id),
                ));
            }
        }
        if let (Some(lower), Some(first)) = (lower, node.entries.first()) {
            if self.comparator.compare(lower, &first.key) != Ordering::Less {
                return Err(BTreeError::data_integrity(
                    "Ordering",
                    &format!("node {} starts at or below its lower separator", node_id),
                ));
            }
        }
        if let (Some(upper), Some(last)) = (upper, node.entries.last()) {
            if self.comparator.compare(&last.key, upper) != Ordering::Less {
                return Err(BTreeError::data_integrity(
                    "Ordering",
                    &format!("node {} ends at or above its upper separator", node_id),
                ));
            }
        }

        if node.is_leaf {
            match state.leaf_depth {
                None => state.leaf_depth = Some(depth),
                Some(expected) if expected != depth => {
                    return Err(BTreeError::data_integrity(
                        "Balance",
                        &format!(
                            "leaf {} at depth {}, expected {}",
                            node_id, depth, expected
                        ),
                    ));
                }
                Some(_) => {}
            }
            return Ok(());
        }

        for (i, &child_id) in node.children.iter().enumerate() {
            let child_lower = if i == 0 {
                lower
            } else {
                Some(&node.entries[i - 1].key)
            };
            let child_upper = if i == node.len() {
                upper
            } else {
                Some(&node.entries[i].key)
            };
            self.check_node(child_id, child_lower, child_upper, depth + 1, state)?;
        }
        Ok(())
    }

    /// Check that an in-order walk yields strictly ascending keys.
    fn check_in_order(&self) -> TreeResult<()> {
        let keys = self.in_order_keys();
        for (i, pair) in keys.windows(2).enumerate() {
            if self.comparator.compare(pair[0], pair[1]) != Ordering::Less {
                return Err(BTreeError::data_integrity(
                    "In-order walk",
                    &format!("keys at positions {} and {} are out of order", i, i + 1),
                ));
            }
        }
        Ok(())
    }

    /// Check that arena allocation matches tree structure
    fn check_arena_tree_consistency(&self, nodes_in_tree: usize) -> TreeResult<()> {
        let stats = self.nodes.stats();
        if nodes_in_tree != stats.allocated_count {
            return Err(BTreeError::data_integrity(
                "Arena consistency",
                &format!(
                    "{} nodes in tree vs {} in arena",
                    nodes_in_tree, stats.allocated_count
                ),
            ));
        }
        Ok(())
    }
}

// ============================================================================
// DEBUGGING AND TESTING UTILITIES
// ============================================================================

impl<K, V, C> BTree<K, V, C> {
    /// Keys in in-order traversal order (for testing/debugging).
    pub(crate) fn in_order_keys(&self) -> Vec<&K> {
        let mut keys = Vec::new();
        self.collect_keys(self.root, &mut keys);
        keys
    }

    fn collect_keys<'a>(&'a self, node_id: NodeId, keys: &mut Vec<&'a K>) {
        let node = self.nodes.slot(node_id);
        for (i, entry) in node.entries.iter().enumerate() {
            if !node.is_leaf {
                self.collect_keys(node.children[i], keys);
            }
            keys.push(&entry.key);
        }
        if let Some(&last) = node.children.last() {
            self.collect_keys(last, keys);
        }
    }

    /// Number of levels, counting a lone root leaf as one.
    #[cfg(test)]
    pub(crate) fn height(&self) -> usize {
        let mut height = 1;
        let mut node = self.nodes.slot(self.root);
        while let Some(&first) = node.children.first() {
            node = self.nodes.slot(first);
            height += 1;
        }
        height
    }

    /// Render the node structure, one node per line, indented by depth.
    pub fn structure_dump(&self) -> String
    where
        K: Debug,
    {
        let mut out = String::new();
        self.dump_node(self.root, 0, &mut out);
        out
    }

    /// Prints the node structure for debugging.
    pub fn print_node_chain(&self)
    where
        K: Debug,
    {
        println!("Tree structure:");
        print!("{}", self.structure_dump());
    }

    fn dump_node(&self, node_id: NodeId, depth: usize, out: &mut String)
    where
        K: Debug,
    {
        let node = self.nodes.slot(node_id);
        let keys: Vec<&K> = node.entries.iter().map(|entry| &entry.key).collect();
        let kind = if node.is_leaf { "Leaf" } else { "Internal" };
        out.push_str(&format!(
            "{}{}[id={}]: {:?}\n",
            "  ".repeat(depth),
            kind,
            node_id,
            keys
        ));
        for &child in &node.children {
            self.dump_node(child, depth + 1, out);
        }
    }
}
