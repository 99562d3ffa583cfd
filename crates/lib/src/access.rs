//! Deep get/set by path over any [`Nested`] tree.
//!
//! Reads are total: a missing segment yields `None`. Writes create the
//! intermediate containers they need (a list when the next key is an index, a
//! map otherwise) and fail only when asked to descend through a leaf.
//!
//! ```
//! use formstate::access::{get_deep, set_deep};
//! use formstate::path::KeyPath;
//! use serde_json::json;
//!
//! let mut doc = json!({});
//! let path: KeyPath = "user.emails.1".parse()?;
//! set_deep(&mut doc, json!("b@example.com"), &path)?;
//! assert_eq!(doc, json!({"user": {"emails": [null, "b@example.com"]}}));
//! assert_eq!(get_deep(&doc, &path), Some(&json!("b@example.com")));
//! # Ok::<(), formstate::Error>(())
//! ```

use thiserror::Error;

use crate::{
    Result,
    nested::{Nested, SlotError},
    path::{Key, KeyPath},
};

/// Errors raised while writing into a nested structure.
#[non_exhaustive]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AccessError {
    /// A leaf sits where the path still needs a container.
    #[error("Cannot descend into leaf at '{path}' to reach segment '{segment}'")]
    ShapeTraversal { path: String, segment: String },

    /// A named (non-numeric) key was applied to a list.
    #[error("List at '{path}' cannot take field '{segment}'")]
    FieldOnList { path: String, segment: String },

    /// A list index lies too far past the end of the list to pad up to.
    #[error("Index '{segment}' is too far past the end of the list at '{path}'")]
    IndexOutOfRange { path: String, segment: String },
}

impl AccessError {
    /// Check if this error came from descending through a leaf.
    pub fn is_shape_traversal(&self) -> bool {
        matches!(self, AccessError::ShapeTraversal { .. })
    }

    /// The path of the node where the walk stopped.
    pub fn path(&self) -> &str {
        match self {
            AccessError::ShapeTraversal { path, .. }
            | AccessError::FieldOnList { path, .. }
            | AccessError::IndexOutOfRange { path, .. } => path,
        }
    }

    fn from_slot(err: SlotError, walked: &[Key], segment: &Key) -> Self {
        let path = KeyPath::from_keys(walked.iter().cloned()).to_string();
        let segment = segment.to_segment();
        match err {
            SlotError::NotContainer => AccessError::ShapeTraversal { path, segment },
            SlotError::FieldOnList => AccessError::FieldOnList { path, segment },
            SlotError::IndexOutOfRange => AccessError::IndexOutOfRange { path, segment },
        }
    }
}

impl From<AccessError> for crate::Error {
    fn from(err: AccessError) -> Self {
        crate::Error::Access(err)
    }
}

/// Follows `path` from `root`. Returns `None` if any segment is missing.
pub fn get_deep<'a, T: Nested>(root: &'a T, path: &KeyPath) -> Option<&'a T> {
    path.iter().try_fold(root, |node, key| node.child(key))
}

/// Mutable counterpart of [`get_deep`]. Never creates anything.
pub fn get_deep_mut<'a, T: Nested>(root: &'a mut T, path: &KeyPath) -> Option<&'a mut T> {
    let mut node = root;
    for key in path {
        node = node.child_mut(key)?;
    }
    Some(node)
}

/// Assigns `value` at `path` inside `root`, creating intermediate containers.
///
/// The empty path replaces `root` itself. Writing past the end of a list pads
/// it with vacant slots. Returns `root` so calls can be chained.
///
/// # Errors
/// [`AccessError::ShapeTraversal`] when a leaf blocks the path,
/// [`AccessError::FieldOnList`] when a list is addressed by a field name, and
/// [`AccessError::IndexOutOfRange`] when an index would pad a list by more
/// than [`crate::nested::MAX_LIST_PADDING`] slots. On error, containers
/// created for earlier segments are left in place.
pub fn set_deep<'a, T: Nested>(
    root: &'a mut T,
    value: T,
    path: &KeyPath,
) -> std::result::Result<&'a mut T, AccessError> {
    let keys = path.keys();
    let Some((last, parents)) = keys.split_last() else {
        *root = value;
        return Ok(root);
    };

    let mut node: &mut T = &mut *root;
    for (depth, key) in parents.iter().enumerate() {
        open_container(node, key);
        let slot = node
            .slot_mut(key)
            .map_err(|e| AccessError::from_slot(e, &keys[..depth], key))?;
        node = slot;
    }

    open_container(node, last);
    let slot = node
        .slot_mut(last)
        .map_err(|e| AccessError::from_slot(e, parents, last))?;
    *slot = value;
    Ok(root)
}

/// Replaces a placeholder node with the container `key` expects.
fn open_container<T: Nested>(node: &mut T, key: &Key) {
    if node.is_placeholder() {
        *node = if key.is_index() {
            T::new_list()
        } else {
            T::new_map()
        };
    }
}

/// [`get_deep`] for a path string in the given separator.
pub fn get_deep_str<'a, T: Nested>(root: &'a T, path: &str, separator: char) -> Result<Option<&'a T>> {
    let path = KeyPath::decode(path, separator)?;
    Ok(get_deep(root, &path))
}

/// [`set_deep`] for a path string in the given separator.
pub fn set_deep_str<'a, T: Nested>(
    root: &'a mut T,
    value: T,
    path: &str,
    separator: char,
) -> Result<&'a mut T> {
    let path = KeyPath::decode(path, separator)?;
    Ok(set_deep(root, value, &path)?)
}
