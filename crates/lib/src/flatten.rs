//! Flattening nested structures into path-keyed leaf entries.
//!
//! All functions share one depth-first, pre-order traversal in each
//! container's enumeration order. A node is a leaf when it is not a container
//! or when it is an empty container below the root; vacant list slots are
//! skipped. An empty root container has no leaves.
//!
//! The string-keyed forms only list leaves whose path can be encoded with the
//! given separator: a map key that is empty or contains the separator would
//! collide with another path, so its subtree is skipped with a warning.
//!
//! ```
//! use formstate::flatten::flatten_object;
//! use serde_json::json;
//!
//! let subject = json!({"a": {"b": 1, "c": [2, 3]}});
//! let flat = flatten_object(&subject, '.');
//! let keys: Vec<&str> = flat.keys().map(String::as_str).collect();
//! assert_eq!(keys, ["a.b", "a.c.0", "a.c.1"]);
//! assert_eq!(flat["a.c.1"], &json!(3));
//! ```

use indexmap::IndexMap;
use serde::Serialize;
use tracing::warn;

use crate::{
    nested::{NodeKind, Nested},
    path::KeyPath,
};

/// One entry of [`flatten_object_to_array`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlatEntry<T> {
    /// Encoded path of the leaf.
    pub key: String,
    /// The leaf itself.
    pub value: T,
}

/// Every leaf of `root` with its canonical path, in traversal order.
///
/// This is the walker the tracker seeds from: paths are never re-parsed from
/// strings, so a map key that looks numeric stays a field key.
pub fn leaf_paths<T: Nested>(root: &T) -> Vec<(KeyPath, &T)> {
    let mut out = Vec::new();
    let mut path = KeyPath::root();
    if root.is_container() {
        for (key, child) in root.children() {
            path.push(key);
            walk(child, &mut path, &mut out);
            path.pop();
        }
    } else {
        walk(root, &mut path, &mut out);
    }
    out
}

/// [`leaf_paths`] restricted to paths that round-trip through `separator`.
///
/// Paths through a map key that is empty or contains `separator` are dropped
/// and logged at `warn`.
pub fn encodable_leaf_paths<T: Nested>(root: &T, separator: char) -> Vec<(KeyPath, &T)> {
    leaf_paths(root)
        .into_iter()
        .filter(|(path, _)| {
            let encodable = path.is_encodable(separator);
            if !encodable {
                warn!(
                    path = ?path.keys(),
                    separator = %separator,
                    "Skipping leaf whose key cannot be encoded"
                );
            }
            encodable
        })
        .collect()
}

fn walk<'a, T: Nested>(node: &'a T, path: &mut KeyPath, out: &mut Vec<(KeyPath, &'a T)>) {
    if node.kind() == NodeKind::Vacant {
        return;
    }
    if node.is_terminal() {
        out.push((path.clone(), node));
        return;
    }
    for (key, child) in node.children() {
        path.push(key);
        walk(child, path, out);
        path.pop();
    }
}

/// Maps each leaf's encoded path to the leaf, preserving discovery order.
pub fn flatten_object<T: Nested>(obj: &T, separator: char) -> IndexMap<String, &T> {
    encodable_leaf_paths(obj, separator)
        .into_iter()
        .map(|(path, leaf)| (path.encode(separator), leaf))
        .collect()
}

/// Same traversal as [`flatten_object`], as an ordered sequence.
///
/// The order of the returned entries is part of the contract.
pub fn flatten_object_to_array<T: Nested>(obj: &T, separator: char) -> Vec<FlatEntry<&T>> {
    encodable_leaf_paths(obj, separator)
        .into_iter()
        .map(|(path, value)| FlatEntry {
            key: path.encode(separator),
            value,
        })
        .collect()
}
