//! B-tree ordered map in Rust.
//!
//! This crate provides an in-memory ordered key-value map backed by a classical
//! B-tree of minimum degree `t`, supporting point lookup, insert-if-absent,
//! upsert and delete with logarithmic height regardless of operation order.
//!
//! Both rebalancing paths run top-down in a single pass: inserts split full
//! nodes before entering them, deletes top up minimal nodes (by borrowing from
//! a sibling or merging with one) before entering them.
//!
//! ```
//! use mwaytree::BTree;
//!
//! let mut tree = BTree::new(2).unwrap();
//! for key in 1..=4 {
//!     tree.insert(key, key * 10);
//! }
//! assert_eq!(tree.search(&3), Some(&30));
//! assert_eq!(tree.put(3, 33), Some(30));
//! assert_eq!(tree.delete(&2).map(|entry| entry.into_value()), Some(20));
//! tree.validate().unwrap();
//! ```

mod compact_arena;
mod construction;
mod delete_operations;
mod error;
mod get_operations;
mod insert_operations;
mod node;
mod ordering;
mod tree_structure;
mod types;
mod validation;

pub use compact_arena::{CompactArena, CompactArenaStats};
pub use construction::validation as config;
pub use error::{BTreeError, BTreeResult, InitResult};
pub use ordering::{Comparator, NaturalOrder};
pub use types::{BTree, Entry, Node, NodeId, DEFAULT_MIN_DEGREE, MAX_MIN_DEGREE, MIN_DEGREE};
