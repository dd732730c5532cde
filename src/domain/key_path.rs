// SPDX-License-Identifier: MIT OR Apache-2.0

//! Key-path utilities.
//!
//! Registry lookups address the merged tree with `/`-separated keys, and
//! sources derive the namespace their subtree lands under from their identity
//! (file stem or collection name). Both conventions live here.

use crate::domain::{ConfigTree, ConfigValue};

/// Names whose configuration merges at the registry root instead of under a
/// derived namespace. Applies to file stems and collection names alike.
pub const RESERVED_TOP_LEVEL_NAMES: &[&str] = &["fwissr"];

/// Splits a lookup key into its path segments.
///
/// A single leading `/` is optional and has no semantic effect; trailing
/// slashes are ignored. There is no escaping mechanism for keys containing
/// `/`.
///
/// # Examples
///
/// ```
/// use fwissr::domain::key_path::split_key;
///
/// assert_eq!(split_key("/foo/bar"), vec!["foo", "bar"]);
/// assert_eq!(split_key("foo/bar"), vec!["foo", "bar"]);
/// assert!(split_key("/").is_empty());
/// ```
pub fn split_key(key: &str) -> Vec<&str> {
    let mut segments: Vec<&str> = key.split('/').collect();
    if segments.first() == Some(&"") {
        segments.remove(0);
    }
    while segments.last() == Some(&"") {
        segments.pop();
    }
    segments
}

/// Derives the namespace key path a source's subtree merges under.
///
/// The source name (file stem or collection name) splits on `.`, so
/// `my_app.database` lands at `/my_app/database`. Reserved top-level names
/// and the `top_level` option suppress namespacing entirely.
pub fn namespace_for(name: &str, top_level: bool) -> Vec<String> {
    if top_level || RESERVED_TOP_LEVEL_NAMES.contains(&name) {
        Vec::new()
    } else {
        name.split('.').map(str::to_string).collect()
    }
}

/// Enumerates every path reachable in `tree`, depth first.
///
/// Intermediate Mapping paths are included, not just leaves. Each path
/// renders as `/`-joined segments with a leading `/`; the result is sorted.
pub fn collect_keys(tree: &ConfigTree) -> Vec<String> {
    let mut result = Vec::new();
    let mut prefix = Vec::new();
    walk(tree, &mut prefix, &mut result);
    result.sort();
    result
}

fn walk<'a>(tree: &'a ConfigTree, prefix: &mut Vec<&'a str>, result: &mut Vec<String>) {
    for (key, value) in tree {
        prefix.push(key);
        result.push(format!("/{}", prefix.join("/")));
        if let ConfigValue::Mapping(child) = value {
            walk(child, prefix, result);
        }
        prefix.pop();
    }
}
