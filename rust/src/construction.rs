//! Construction and initialization logic for BTree and nodes.
//!
//! This module contains the constructors, minimum degree validation and the
//! default implementations for the tree and its building blocks.

use crate::compact_arena::CompactArena;
use crate::error::{BTreeError, InitResult};
use crate::ordering::{Comparator, NaturalOrder};
use crate::types::{BTree, Entry, Node, DEFAULT_MIN_DEGREE, MAX_MIN_DEGREE, MIN_DEGREE};

/// Upper bound on the entries reserved up front for a fresh node.
const PREALLOCATED_ENTRIES: usize = 64;

impl<K: Ord, V> BTree<K, V, NaturalOrder> {
    /// Create a B-tree ordered by the key type's `Ord` implementation.
    ///
    /// # Arguments
    ///
    /// * `min_degree` - Minimum degree `t`; nodes hold at most `2t - 1` entries (minimum 2)
    ///
    /// # Returns
    ///
    /// Returns `Ok(BTree)` if the degree is valid, `Err(BTreeError)` otherwise.
    ///
    /// # Examples
    ///
    /// ```
    /// use mwaytree::BTree;
    ///
    /// let tree = BTree::<i32, String>::new(3).unwrap();
    /// assert!(tree.is_empty());
    /// assert!(BTree::<i32, String>::new(1).is_err());
    /// ```
    pub fn new(min_degree: usize) -> InitResult<Self> {
        Self::with_comparator(min_degree, NaturalOrder)
    }

    /// Create a B-tree with [`DEFAULT_MIN_DEGREE`].
    pub fn with_default_degree() -> Self {
        Self::from_parts(DEFAULT_MIN_DEGREE, NaturalOrder)
    }
}

impl<K, V, C: Comparator<K>> BTree<K, V, C> {
    /// Create a B-tree ordered by an injected comparator.
    ///
    /// The comparator is the only ordering the tree ever consults, for every
    /// search and insertion over its lifetime.
    ///
    /// # Examples
    ///
    /// ```
    /// use mwaytree::BTree;
    ///
    /// let mut tree = BTree::with_comparator(2, |a: &i32, b: &i32| b.cmp(a)).unwrap();
    /// tree.insert(1, "one");
    /// tree.insert(2, "two");
    /// assert_eq!(tree.search(&2), Some(&"two"));
    /// ```
    pub fn with_comparator(min_degree: usize, comparator: C) -> InitResult<Self> {
        validation::validate_min_degree(min_degree)?;
        Ok(Self::from_parts(min_degree, comparator))
    }
}

impl<K, V, C> BTree<K, V, C> {
    /// Assemble an empty tree: a single empty leaf as root.
    pub(crate) fn from_parts(min_degree: usize, comparator: C) -> Self {
        let mut nodes = CompactArena::new();
        let root = nodes.allocate(Node::new_leaf(min_degree));

        Self {
            min_degree,
            root,
            nodes,
            comparator,
        }
    }
}

impl<K, V> Entry<K, V> {
    /// Creates a new entry.
    pub fn new(key: K, value: V) -> Self {
        Self { key, value }
    }
}

impl<K, V> Node<K, V> {
    /// Creates an empty leaf sized for a tree of minimum degree `min_degree`.
    pub fn new_leaf(min_degree: usize) -> Self {
        Self {
            entries: Vec::with_capacity(preallocated_entries(min_degree)),
            children: Vec::new(),
            is_leaf: true,
        }
    }

    /// Creates an empty internal node sized for a tree of minimum degree `min_degree`.
    pub fn new_internal(min_degree: usize) -> Self {
        Self {
            entries: Vec::with_capacity(preallocated_entries(min_degree)),
            children: Vec::with_capacity(preallocated_entries(min_degree) + 1),
            is_leaf: false,
        }
    }
}

/// Entries to reserve for a node: a full node, unless that is large.
fn preallocated_entries(min_degree: usize) -> usize {
    min_degree
        .saturating_mul(2)
        .saturating_sub(1)
        .min(PREALLOCATED_ENTRIES)
}

// Default implementations
impl<K: Ord, V> Default for BTree<K, V, NaturalOrder> {
    /// Create a B-tree with the default minimum degree.
    fn default() -> Self {
        Self::with_default_degree()
    }
}

impl<K, V> Default for Node<K, V> {
    /// An empty leaf with no reserved space; what a freed arena slot holds.
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            children: Vec::new(),
            is_leaf: true,
        }
    }
}

/// Validation utilities for construction
pub mod validation {
    use super::*;

    /// Validate that a minimum degree is legal.
    ///
    /// # Returns
    ///
    /// Returns `Ok(())` if valid, `Err(BTreeError)` otherwise.
    pub fn validate_min_degree(min_degree: usize) -> InitResult<()> {
        if min_degree < MIN_DEGREE {
            Err(BTreeError::invalid_min_degree(min_degree, MIN_DEGREE))
        } else if min_degree > MAX_MIN_DEGREE {
            Err(BTreeError::min_degree_too_large(min_degree, MAX_MIN_DEGREE))
        } else {
            Ok(())
        }
    }

    /// Get the recommended minimum degree for a given expected number of entries.
    ///
    /// Small maps favour shallow binary-search work per node, large maps favour
    /// fewer levels. Always returns at least [`MIN_DEGREE`].
    pub fn recommended_min_degree(expected_entries: usize) -> usize {
        if expected_entries < 100 {
            MIN_DEGREE
        } else if expected_entries < 10_000 {
            8
        } else if expected_entries < 1_000_000 {
            16
        } else {
            32
        }
    }
}
