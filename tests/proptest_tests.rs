// SPDX-License-Identifier: MIT OR Apache-2.0

//! Property-based tests using proptest.
//!
//! These tests verify the merge and key-path invariants over arbitrary
//! configuration trees.

use fwissr::domain::key_path::split_key;
use fwissr::domain::merge::{merge, merge_into};
use fwissr::domain::{ConfigTree, ConfigValue};
use proptest::prelude::*;

/// Arbitrary configuration values, a few levels deep.
fn arb_value() -> impl Strategy<Value = ConfigValue> {
    let leaf = prop_oneof![
        Just(ConfigValue::Null),
        any::<bool>().prop_map(ConfigValue::Bool),
        any::<i64>().prop_map(ConfigValue::Integer),
        "[a-z]{0,8}".prop_map(ConfigValue::String),
    ];
    leaf.prop_recursive(3, 16, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(ConfigValue::Sequence),
            prop::collection::btree_map("[a-d]", inner, 0..4).prop_map(ConfigValue::Mapping),
        ]
    })
}

/// Arbitrary trees whose top-level keys come from `keys`.
fn arb_tree(keys: &'static str) -> impl Strategy<Value = ConfigTree> {
    prop::collection::btree_map(keys, arb_value(), 0..4)
}

// Merging a tree into itself changes nothing
proptest! {
    #[test]
    fn test_merge_is_idempotent(tree in arb_tree("[a-d]")) {
        prop_assert_eq!(merge(tree.clone(), tree.clone()), tree);
    }
}

// Every key of the incoming tree survives a merge
proptest! {
    #[test]
    fn test_merge_keeps_incoming_keys(
        base in arb_tree("[a-d]"),
        incoming in arb_tree("[a-d]"),
    ) {
        let merged = merge(base, incoming.clone());
        for key in incoming.keys() {
            prop_assert!(merged.contains_key(key));
        }
    }
}

// A non-mapping incoming value always replaces the base value wholesale
proptest! {
    #[test]
    fn test_merge_right_bias_on_scalars(
        base in arb_tree("[a-d]"),
        key in "[a-d]",
        value in any::<i64>(),
    ) {
        let mut incoming = ConfigTree::new();
        incoming.insert(key.clone(), ConfigValue::Integer(value));

        let merged = merge(base, incoming);
        prop_assert_eq!(merged.get(&key), Some(&ConfigValue::Integer(value)));
    }
}

// Merging disjoint trees is associative across source order
proptest! {
    #[test]
    fn test_merge_disjoint_associativity(
        a in arb_tree("[a-b]"),
        b in arb_tree("[c-d]"),
        c in arb_tree("[e-f]"),
    ) {
        let left = merge(merge(a.clone(), b.clone()), c.clone());
        let right = merge(a, merge(b, c));
        prop_assert_eq!(left, right);
    }
}

// Merging disjoint trees is a plain union
proptest! {
    #[test]
    fn test_merge_disjoint_union(
        a in arb_tree("[a-b]"),
        b in arb_tree("[c-d]"),
    ) {
        let merged = merge(a.clone(), b.clone());
        prop_assert_eq!(merged.len(), a.len() + b.len());
        for (key, value) in a.iter().chain(b.iter()) {
            prop_assert_eq!(merged.get(key), Some(value));
        }
    }
}

// The in-place and by-value merge variants agree
proptest! {
    #[test]
    fn test_merge_into_matches_merge(
        base in arb_tree("[a-d]"),
        incoming in arb_tree("[a-d]"),
    ) {
        let merged = merge(base.clone(), incoming.clone());

        let mut in_place = base;
        merge_into(&mut in_place, incoming);
        prop_assert_eq!(in_place, merged);
    }
}

// A leading slash never changes how a key splits
proptest! {
    #[test]
    fn test_split_key_leading_slash_equivalence(key in "[a-z/]{0,12}") {
        let with_slash = format!("/{}", key);
        if !key.starts_with('/') {
            prop_assert_eq!(split_key(&with_slash), split_key(&key));
        }
    }
}

// Splitting a joined path recovers the segments
proptest! {
    #[test]
    fn test_split_key_roundtrip(segments in prop::collection::vec("[a-z]{1,6}", 1..5)) {
        let key = format!("/{}", segments.join("/"));
        prop_assert_eq!(split_key(&key), segments);
    }
}
