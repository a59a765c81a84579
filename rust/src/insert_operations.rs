//! INSERT operations for BTree.
//!
//! This module contains the insertion operations: insert-if-absent, upsert,
//! the child split primitive and root growth. Splitting is eager and top-down:
//! a full node is split before the descent enters it, so the node receiving a
//! promoted median is never full and no split ever propagates upward.

use std::cmp::Ordering;

use crate::ordering::Comparator;
use crate::types::{BTree, Entry, InsertResult, Node, NodeId, OnExisting};

impl<K, V, C: Comparator<K>> BTree<K, V, C> {
    // ============================================================================
    // PUBLIC INSERT OPERATIONS
    // ============================================================================

    /// Insert a key-value pair if the key is absent.
    ///
    /// # Returns
    ///
    /// `true` if the entry was added, `false` if the key was already present.
    /// A rejected insert leaves the tree exactly as it was, structure included.
    ///
    /// # Examples
    ///
    /// ```
    /// use mwaytree::BTree;
    ///
    /// let mut tree = BTree::new(2).unwrap();
    /// assert!(tree.insert(1, "one"));
    /// assert!(!tree.insert(1, "uno"));
    /// assert_eq!(tree.search(&1), Some(&"one"));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> bool {
        if self.contains_key(&key) {
            return false;
        }
        matches!(
            self.insert_entry(Entry::new(key, value), OnExisting::Reject),
            InsertResult::Inserted
        )
    }

    /// Insert or update a key-value pair.
    ///
    /// # Returns
    ///
    /// The previous value if the key existed, `None` otherwise.
    ///
    /// # Examples
    ///
    /// ```
    /// use mwaytree::BTree;
    ///
    /// let mut tree = BTree::new(2).unwrap();
    /// assert_eq!(tree.put(1, "one"), None);
    /// assert_eq!(tree.put(1, "uno"), Some("one"));
    /// assert_eq!(tree.search(&1), Some(&"uno"));
    /// ```
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        if let Some(slot) = self.get_mut(&key) {
            return Some(std::mem::replace(slot, value));
        }
        match self.insert_entry(Entry::new(key, value), OnExisting::Replace) {
            InsertResult::Replaced(old_value) => Some(old_value),
            InsertResult::Inserted | InsertResult::Rejected => None,
        }
    }

    // ============================================================================
    // HELPERS FOR INSERT OPERATIONS
    // ============================================================================

    /// Grow the tree if the root is full, then descend.
    fn insert_entry(&mut self, entry: Entry<K, V>, on_existing: OnExisting) -> InsertResult<V> {
        if self.nodes.slot(self.root).is_full(self.min_degree) {
            self.new_root();
        }
        self.insert_non_full(self.root, entry, on_existing)
    }

    /// Wrap the full root in a fresh internal root and split it.
    ///
    /// This is the only place the tree gains height.
    fn new_root(&mut self) {
        let mut new_root = Node::new_internal(self.min_degree);
        new_root.insert_child(0, self.root);
        let new_root_id = self.nodes.allocate(new_root);
        self.split_node(new_root_id, 0);
        self.root = new_root_id;
        tracing::debug!(root = new_root_id, "tree grew by one level");
    }

    /// Split the full child at `index` of `parent_id`.
    ///
    /// The child keeps its lowest `t - 1` entries (and `t` children), a new
    /// sibling takes the highest `t - 1` entries (and `t` children), and the
    /// median moves up into the parent at `index` with the sibling to its right.
    /// The parent must not be full.
    pub(crate) fn split_node(&mut self, parent_id: NodeId, index: usize) {
        let t = self.min_degree;
        let child_id = self.nodes.slot(parent_id).child_at(index);
        let child = self.nodes.slot_mut(child_id);
        debug_assert_eq!(child.len(), 2 * t - 1, "split_node called on a non-full child");

        let mut sibling = if child.is_leaf {
            Node::new_leaf(t)
        } else {
            Node::new_internal(t)
        };
        sibling.entries.extend(child.entries.drain(t..));
        let median = child.remove_entry(t - 1);
        if !child.is_leaf {
            sibling.children.extend(child.children.drain(t..));
        }

        let sibling_id = self.nodes.allocate(sibling);
        let parent = self.nodes.slot_mut(parent_id);
        parent.insert_entry_at(index, median);
        parent.insert_child(index + 1, sibling_id);
        tracing::trace!(parent = parent_id, child = child_id, sibling = sibling_id, "split full child");
    }

    /// Insert into the subtree rooted at a node known not to be full.
    fn insert_non_full(
        &mut self,
        node_id: NodeId,
        entry: Entry<K, V>,
        on_existing: OnExisting,
    ) -> InsertResult<V> {
        let node = self.nodes.slot_mut(node_id);

        if node.is_leaf {
            return match on_existing {
                OnExisting::Reject => {
                    if node.insert_entry(entry, &self.comparator) {
                        InsertResult::Inserted
                    } else {
                        InsertResult::Rejected
                    }
                }
                OnExisting::Replace => match node.put_entry(entry, &self.comparator) {
                    Some(old_value) => InsertResult::Replaced(old_value),
                    None => InsertResult::Inserted,
                },
            };
        }

        let mut index = match node.search(&entry.key, &self.comparator) {
            Ok(index) => return Self::resolve_existing(node, index, entry, on_existing),
            Err(index) => index,
        };

        let child_id = node.child_at(index);
        if self.nodes.slot(child_id).is_full(self.min_degree) {
            self.split_node(node_id, index);
            let node = self.nodes.slot_mut(node_id);
            match self
                .comparator
                .compare(&entry.key, node.entry_at(index).key())
            {
                Ordering::Less => {}
                Ordering::Greater => index += 1,
                Ordering::Equal => return Self::resolve_existing(node, index, entry, on_existing),
            }
        }

        let child_id = self.nodes.slot(node_id).child_at(index);
        self.insert_non_full(child_id, entry, on_existing)
    }

    /// The key already sits at `index` of `node`.
    fn resolve_existing(
        node: &mut Node<K, V>,
        index: usize,
        entry: Entry<K, V>,
        on_existing: OnExisting,
    ) -> InsertResult<V> {
        match on_existing {
            OnExisting::Reject => InsertResult::Rejected,
            OnExisting::Replace => {
                InsertResult::Replaced(node.entries[index].set_value(entry.value))
            }
        }
    }
}
