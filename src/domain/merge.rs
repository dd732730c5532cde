// SPDX-License-Identifier: MIT OR Apache-2.0

//! Deep-merge of configuration trees.
//!
//! Merging is the only operation that combines the subtrees fetched from
//! different sources into the registry's unified tree. Mappings merge
//! recursively; every other kind of value is replaced wholesale, so scalars
//! and sequences are last-writer-wins as a unit.

use crate::domain::{ConfigTree, ConfigValue};
use std::collections::btree_map::Entry;

/// Deep-merges `incoming` into `base` and returns the result.
///
/// # Examples
///
/// ```
/// use fwissr::domain::{merge, ConfigTree};
///
/// let base: ConfigTree = serde_json::from_str(r#"{"a": {"x": 1}}"#).unwrap();
/// let incoming: ConfigTree = serde_json::from_str(r#"{"a": {"y": 2}}"#).unwrap();
///
/// let merged = merge::merge(base, incoming);
/// let expected: ConfigTree = serde_json::from_str(r#"{"a": {"x": 1, "y": 2}}"#).unwrap();
/// assert_eq!(merged, expected);
/// ```
pub fn merge(base: ConfigTree, incoming: ConfigTree) -> ConfigTree {
    let mut result = base;
    merge_into(&mut result, incoming);
    result
}

/// Deep-merges `incoming` into `base` in place.
///
/// For each key in `incoming`: if both sides hold a Mapping the two merge
/// recursively; otherwise the incoming value replaces whatever `base` held.
/// Absent keys are simply added.
pub fn merge_into(base: &mut ConfigTree, incoming: ConfigTree) {
    for (key, value) in incoming {
        match base.entry(key) {
            Entry::Occupied(mut occupied) => match (occupied.get_mut(), value) {
                (ConfigValue::Mapping(existing), ConfigValue::Mapping(incoming_tree)) => {
                    merge_into(existing, incoming_tree);
                }
                (slot, value) => *slot = value,
            },
            Entry::Vacant(vacant) => {
                vacant.insert(value);
            }
        }
    }
}

/// Walks `path` down `tree`, creating intermediate empty Mappings as needed,
/// and returns a mutable reference to the Mapping at the end of the path.
///
/// A non-Mapping value sitting at an intermediate position is replaced by an
/// empty Mapping. An empty `path` returns `tree` itself.
///
/// Both source variants use this to place a fetched subtree at its namespace
/// position before merging.
pub fn ensure_path<'a>(tree: &'a mut ConfigTree, path: &[String]) -> &'a mut ConfigTree {
    let mut node = tree;
    for segment in path {
        let slot = node
            .entry(segment.clone())
            .or_insert_with(|| ConfigValue::Mapping(ConfigTree::new()));
        if !slot.is_mapping() {
            *slot = ConfigValue::Mapping(ConfigTree::new());
        }
        node = match slot {
            ConfigValue::Mapping(tree) => tree,
            _ => unreachable!("slot was just coerced to a mapping"),
        };
    }
    node
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree(json: &str) -> ConfigTree {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_merge_disjoint_keys() {
        let merged = merge(tree(r#"{"a": 1}"#), tree(r#"{"b": 2}"#));
        assert_eq!(merged, tree(r#"{"a": 1, "b": 2}"#));
    }

    #[test]
    fn test_merge_scalar_right_bias() {
        let merged = merge(tree(r#"{"a": 1}"#), tree(r#"{"a": 2}"#));
        assert_eq!(merged, tree(r#"{"a": 2}"#));
    }

    #[test]
    fn test_merge_mappings_union() {
        let merged = merge(tree(r#"{"a": {"x": 1}}"#), tree(r#"{"a": {"y": 2}}"#));
        assert_eq!(merged, tree(r#"{"a": {"x": 1, "y": 2}}"#));
    }

    #[test]
    fn test_merge_nested_right_bias() {
        let merged = merge(
            tree(r#"{"a": {"x": 1, "y": 1}}"#),
            tree(r#"{"a": {"y": 2}}"#),
        );
        assert_eq!(merged, tree(r#"{"a": {"x": 1, "y": 2}}"#));
    }

    #[test]
    fn test_sequences_replaced_wholesale() {
        let merged = merge(tree(r#"{"a": [1, 2, 3]}"#), tree(r#"{"a": [4]}"#));
        assert_eq!(merged, tree(r#"{"a": [4]}"#));
    }

    #[test]
    fn test_mapping_replaces_scalar() {
        let merged = merge(tree(r#"{"a": 1}"#), tree(r#"{"a": {"x": 1}}"#));
        assert_eq!(merged, tree(r#"{"a": {"x": 1}}"#));
    }

    #[test]
    fn test_scalar_replaces_mapping() {
        let merged = merge(tree(r#"{"a": {"x": 1}}"#), tree(r#"{"a": 1}"#));
        assert_eq!(merged, tree(r#"{"a": 1}"#));
    }

    #[test]
    fn test_ensure_path_creates_intermediates() {
        let mut root = ConfigTree::new();
        let leaf = ensure_path(
            &mut root,
            &["my_app".to_string(), "database".to_string()],
        );
        leaf.insert("host".to_string(), ConfigValue::from("db1"));

        assert_eq!(root, tree(r#"{"my_app": {"database": {"host": "db1"}}}"#));
    }

    #[test]
    fn test_ensure_path_empty_is_root() {
        let mut root = tree(r#"{"a": 1}"#);
        let leaf = ensure_path(&mut root, &[]);
        leaf.insert("b".to_string(), ConfigValue::Integer(2));
        assert_eq!(root, tree(r#"{"a": 1, "b": 2}"#));
    }

    #[test]
    fn test_ensure_path_replaces_non_mapping_intermediate() {
        let mut root = tree(r#"{"a": 1}"#);
        ensure_path(&mut root, &["a".to_string(), "b".to_string()]);
        assert_eq!(root, tree(r#"{"a": {"b": {}}}"#));
    }

    #[test]
    fn test_ensure_path_reuses_existing_mapping() {
        let mut root = tree(r#"{"a": {"keep": true}}"#);
        let leaf = ensure_path(&mut root, &["a".to_string()]);
        leaf.insert("new".to_string(), ConfigValue::Bool(false));
        assert_eq!(root, tree(r#"{"a": {"keep": true, "new": false}}"#));
    }
}
