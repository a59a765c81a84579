//! Core types and data structures for BTree.
//!
//! This module contains the fundamental data structures, type definitions,
//! and constants used throughout the B-tree implementation.

use std::fmt;

use crate::compact_arena::CompactArena;
pub use crate::compact_arena::NodeId;
use crate::ordering::NaturalOrder;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Smallest legal minimum degree `t`.
pub const MIN_DEGREE: usize = 2;

/// Largest legal minimum degree: keeps `2t` within both `usize` and [`NodeId`].
pub const MAX_MIN_DEGREE: usize = (u32::MAX / 2) as usize;

/// Minimum degree used by `Default` and `with_default_degree`.
pub const DEFAULT_MIN_DEGREE: usize = 2;

// ============================================================================
// CORE DATA STRUCTURES
// ============================================================================

/// Ordered map backed by a classical B-tree of minimum degree `t`.
///
/// Every node except the root holds between `t - 1` and `2t - 1` entries, an
/// internal node with `n` entries has `n + 1` children, and all leaves sit at
/// the same depth. Unlike a B+ tree, values live in internal nodes too.
///
/// Rebalancing is strictly top-down: a full child is split before the insert
/// descends into it, and a minimal child is topped up (borrow or merge) before
/// the delete descends into it. Neither operation ever walks back up.
///
/// # Type Parameters
///
/// * `K` - Key type
/// * `V` - Value type
/// * `C` - Key ordering, [`NaturalOrder`] unless a comparator is injected
///
/// # Examples
///
/// ```
/// use mwaytree::BTree;
///
/// let mut tree = BTree::new(2).unwrap();
/// assert!(tree.insert(1, "one"));
/// assert!(!tree.insert(1, "uno"));
/// assert_eq!(tree.put(2, "two"), None);
/// assert_eq!(tree.put(2, "dos"), Some("two"));
///
/// assert_eq!(tree.search(&1), Some(&"one"));
/// assert_eq!(tree.delete(&2).map(|entry| entry.into_parts()), Some((2, "dos")));
/// assert_eq!(tree.search(&2), None);
/// ```
///
/// # Performance Characteristics
///
/// - **Search**: O(t log_t n)
/// - **Insert / put**: O(t log_t n)
/// - **Delete**: O(t log_t n)
pub struct BTree<K, V, C = NaturalOrder> {
    /// Minimum degree `t`.
    pub(crate) min_degree: usize,
    /// The root node of the tree.
    pub(crate) root: NodeId,
    /// Arena storage for every reachable node.
    pub(crate) nodes: CompactArena<Node<K, V>>,
    /// Key ordering, fixed for the life of the tree.
    pub(crate) comparator: C,
}

impl<K, V, C> fmt::Debug for BTree<K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BTree")
            .field("min_degree", &self.min_degree)
            .field("root", &self.root)
            .field("nodes", &self.nodes.len())
            .finish_non_exhaustive()
    }
}

/// A key-value pair stored in the tree.
///
/// The key is fixed once the entry exists; the value can be replaced in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
}

/// A B-tree node: ascending entries and, when internal, one more child than entries.
#[derive(Debug, Clone)]
pub struct Node<K, V> {
    /// Entries in strictly ascending key order.
    pub(crate) entries: Vec<Entry<K, V>>,
    /// Child node ids; empty exactly when `is_leaf`.
    pub(crate) children: Vec<NodeId>,
    pub(crate) is_leaf: bool,
}

// ============================================================================
// RESULT TYPES
// ============================================================================

/// What the insert descent does when it meets the key already in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OnExisting {
    /// Leave the tree untouched and report the key as taken.
    Reject,
    /// Overwrite the stored value and hand back the old one.
    Replace,
}

/// Result of an insertion descent.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum InsertResult<V> {
    /// A new entry was added.
    Inserted,
    /// The key existed and `OnExisting::Reject` was in force.
    Rejected,
    /// The key existed; contains the previous value.
    Replaced(V),
}
