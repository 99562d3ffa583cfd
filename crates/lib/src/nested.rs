//! The tree abstraction every path algorithm walks.
//!
//! [`Nested`] describes a value that is either a map of named children, a list
//! of indexed children, a leaf, or a vacant slot. The accessors in
//! [`crate::access`] and the walkers in [`crate::flatten`] are written once
//! against this trait and work for JSON subjects ([`serde_json::Value`]) and
//! for shadow trees ([`crate::Shadow`]) alike.

use serde_json::Value;

use crate::path::Key;

/// Structural classification of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Named children.
    Map,
    /// Indexed children.
    List,
    /// Terminal value.
    Leaf,
    /// A list hole: present only to keep later indices in place.
    Vacant,
}

/// Most vacant slots a single write may append to a list.
pub const MAX_LIST_PADDING: usize = 1 << 16;

/// Why a child slot could not be opened for writing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotError {
    /// The node is a leaf, so it has no children.
    NotContainer,
    /// A non-numeric key was used on a list.
    FieldOnList,
    /// The index lies more than [`MAX_LIST_PADDING`] slots past the end of
    /// the list.
    IndexOutOfRange,
}

/// Length a list of `len` items must grow to so that `index` exists.
///
/// Returns `len` when `index` is already in range.
pub fn grown_len(len: usize, index: usize) -> Result<usize, SlotError> {
    if index < len {
        return Ok(len);
    }
    if index - len >= MAX_LIST_PADDING {
        return Err(SlotError::IndexOutOfRange);
    }
    index.checked_add(1).ok_or(SlotError::IndexOutOfRange)
}

/// A node in a tree of maps, lists and leaves.
pub trait Nested: Sized {
    /// Structural kind of this node.
    fn kind(&self) -> NodeKind;

    /// An empty map node.
    fn new_map() -> Self;

    /// An empty list node.
    fn new_list() -> Self;

    /// The filler used for list holes and freshly opened slots.
    fn vacant() -> Self;

    /// Child under `key`, if this is a container holding one.
    fn child(&self, key: &Key) -> Option<&Self>;

    /// Mutable child under `key`, if this is a container holding one.
    fn child_mut(&mut self, key: &Key) -> Option<&mut Self>;

    /// Mutable child under `key`, inserting [`Nested::vacant`] when missing.
    ///
    /// Lists grow to fit the index, padding with vacant slots.
    fn slot_mut(&mut self, key: &Key) -> Result<&mut Self, SlotError>;

    /// Direct children in enumeration order (insertion order for maps,
    /// ascending index for lists). Leaves have none.
    fn children(&self) -> Box<dyn Iterator<Item = (Key, &Self)> + '_>;

    /// Returns `true` if a write may replace this node with a container.
    fn is_placeholder(&self) -> bool {
        self.kind() == NodeKind::Vacant
    }

    /// Returns `true` for maps and lists.
    fn is_container(&self) -> bool {
        matches!(self.kind(), NodeKind::Map | NodeKind::List)
    }

    /// Returns `true` if this node ends a walk: a leaf, or an empty container.
    fn is_terminal(&self) -> bool {
        match self.kind() {
            NodeKind::Leaf => true,
            NodeKind::Map | NodeKind::List => self.children().next().is_none(),
            NodeKind::Vacant => false,
        }
    }
}

/// JSON values as subjects. `null` is a leaf when walked, but a write through
/// a `null` replaces it with a container.
impl Nested for Value {
    fn kind(&self) -> NodeKind {
        match self {
            Value::Object(_) => NodeKind::Map,
            Value::Array(_) => NodeKind::List,
            _ => NodeKind::Leaf,
        }
    }

    fn new_map() -> Self {
        Value::Object(serde_json::Map::new())
    }

    fn new_list() -> Self {
        Value::Array(Vec::new())
    }

    fn vacant() -> Self {
        Value::Null
    }

    fn child(&self, key: &Key) -> Option<&Self> {
        match self {
            Value::Object(map) => map.get(&key.to_segment()),
            Value::Array(items) => items.get(key.as_index()?),
            _ => None,
        }
    }

    fn child_mut(&mut self, key: &Key) -> Option<&mut Self> {
        match self {
            Value::Object(map) => map.get_mut(&key.to_segment()),
            Value::Array(items) => items.get_mut(key.as_index()?),
            _ => None,
        }
    }

    fn slot_mut(&mut self, key: &Key) -> Result<&mut Self, SlotError> {
        match self {
            Value::Object(map) => Ok(map.entry(key.to_segment()).or_insert(Value::Null)),
            Value::Array(items) => {
                let index = key.as_index().ok_or(SlotError::FieldOnList)?;
                let len = grown_len(items.len(), index)?;
                items.resize(len, Value::Null);
                Ok(&mut items[index])
            }
            _ => Err(SlotError::NotContainer),
        }
    }

    fn children(&self) -> Box<dyn Iterator<Item = (Key, &Self)> + '_> {
        match self {
            Value::Object(map) => Box::new(map.iter().map(|(k, v)| (Key::Field(k.clone()), v))),
            Value::Array(items) => Box::new(
                items
                    .iter()
                    .enumerate()
                    .map(|(i, v)| (Key::Index(i), v)),
            ),
            _ => Box::new(std::iter::empty()),
        }
    }

    fn is_placeholder(&self) -> bool {
        self.is_null()
    }
}
