//! Key ordering capability.
//!
//! A tree compares keys through exactly one [`Comparator`], chosen by its type
//! parameter at construction. [`NaturalOrder`] defers to `Ord`; any
//! `Fn(&K, &K) -> Ordering` can be injected instead.

use std::cmp::Ordering;

/// A total order over keys of type `K`.
///
/// Implementations must be consistent for the lifetime of a tree: the same pair
/// of keys must always compare the same way.
pub trait Comparator<K: ?Sized> {
    fn compare(&self, a: &K, b: &K) -> Ordering;
}

/// The key type's own `Ord` implementation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NaturalOrder;

impl<K: Ord + ?Sized> Comparator<K> for NaturalOrder {
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        a.cmp(b)
    }
}

impl<K: ?Sized, F> Comparator<K> for F
where
    F: Fn(&K, &K) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        self(a, b)
    }
}
