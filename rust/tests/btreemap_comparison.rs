//! Differential tests against `std::collections::BTreeMap`.
//!
//! Every test family is instantiated for several minimum degrees so that both
//! the tiny `t = 2` trees (which rebalance on almost every operation) and wide
//! nodes get exercised.

use mwaytree::BTree;
use paste::paste;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::collections::BTreeMap;

const KEY_SPACE: i32 = 500;
const OPERATIONS: usize = 5_000;

fn random_ops_match_std_btreemap(min_degree: usize, seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut tree = BTree::new(min_degree).unwrap();
    let mut model = BTreeMap::new();

    for step in 0..OPERATIONS {
        let key = rng.gen_range(0..KEY_SPACE);
        match rng.gen_range(0..4) {
            0 => {
                let value = rng.gen::<u32>();
                let expected = !model.contains_key(&key);
                if expected {
                    model.insert(key, value);
                }
                assert_eq!(tree.insert(key, value), expected, "step {} insert {}", step, key);
            }
            1 => {
                let value = rng.gen::<u32>();
                assert_eq!(tree.put(key, value), model.insert(key, value), "step {} put {}", step, key);
            }
            2 => {
                let removed = tree.delete(&key).map(|entry| entry.into_parts());
                let expected = model.remove(&key).map(|value| (key, value));
                assert_eq!(removed, expected, "step {} delete {}", step, key);
            }
            _ => {
                assert_eq!(tree.search(&key), model.get(&key), "step {} search {}", step, key);
            }
        }

        if step % 250 == 0 {
            tree.validate().unwrap();
        }
    }

    tree.validate().unwrap();
    for key in 0..KEY_SPACE {
        assert_eq!(tree.search(&key), model.get(&key));
    }
}

fn insert_all_delete_all(min_degree: usize, seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut keys: Vec<u64> = (0..2_000).map(|_| rng.gen()).collect();
    keys.sort_unstable();
    keys.dedup();
    keys.shuffle(&mut rng);

    let mut tree = BTree::new(min_degree).unwrap();
    for &key in &keys {
        assert!(tree.insert(key, key.wrapping_mul(3)));
    }
    tree.validate().unwrap();

    keys.shuffle(&mut rng);
    for (i, &key) in keys.iter().enumerate() {
        let entry = tree.delete(&key).unwrap();
        assert_eq!(entry.into_parts(), (key, key.wrapping_mul(3)));
        assert_eq!(tree.search(&key), None);
        if i % 200 == 0 {
            tree.validate().unwrap();
        }
    }

    assert!(tree.is_empty());
    tree.validate().unwrap();
    assert!(tree.insert(1, 1));
}

fn sequential_patterns(min_degree: usize) {
    let mut tree = BTree::new(min_degree).unwrap();
    for key in 0..1_000 {
        assert!(tree.insert(key, key));
    }
    tree.validate().unwrap();

    // Delete evens ascending, then odds descending.
    for key in (0..1_000).step_by(2) {
        assert_eq!(tree.delete(&key).map(|entry| entry.into_value()), Some(key));
    }
    tree.validate().unwrap();
    for key in (1..1_000).step_by(2).rev() {
        assert_eq!(tree.delete(&key).map(|entry| entry.into_value()), Some(key));
    }
    assert!(tree.is_empty());
    tree.validate().unwrap();
}

macro_rules! degree_suite {
    ($($t:literal),* $(,)?) => {
        paste! {
            $(
                #[test]
                fn [<test_random_ops_match_std_btreemap_t $t>]() {
                    random_ops_match_std_btreemap($t, 0x5EED + $t as u64);
                }

                #[test]
                fn [<test_insert_all_delete_all_t $t>]() {
                    insert_all_delete_all($t, 0xB7 * $t as u64);
                }

                #[test]
                fn [<test_sequential_patterns_t $t>]() {
                    sequential_patterns($t);
                }
            )*
        }
    };
}

degree_suite!(2, 3, 4, 7, 16);

#[test]
fn test_custom_comparator_matches_reverse_model() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut tree = BTree::with_comparator(3, |a: &i64, b: &i64| b.cmp(a)).unwrap();
    let mut model = BTreeMap::new();

    for _ in 0..3_000 {
        let key = rng.gen_range(-200..200);
        if rng.gen_bool(0.6) {
            assert_eq!(tree.put(key, key * 2), model.insert(key, key * 2));
        } else {
            assert_eq!(tree.remove(&key), model.remove(&key));
        }
    }

    tree.validate().unwrap();
    for key in -200..200 {
        assert_eq!(tree.get(&key), model.get(&key));
    }
}

#[test]
fn test_string_keys() {
    let mut tree = BTree::new(2).unwrap();
    let words = ["pear", "apple", "fig", "kiwi", "banana", "cherry", "date", "grape"];
    for (i, word) in words.iter().enumerate() {
        assert!(tree.insert(word.to_string(), i));
    }
    assert!(!tree.insert("fig".to_string(), 99));
    assert_eq!(tree.search(&"fig".to_string()), Some(&2));
    assert_eq!(tree.remove(&"apple".to_string()), Some(1));
    assert!(!tree.contains_key(&"apple".to_string()));
    tree.validate().unwrap();
}
