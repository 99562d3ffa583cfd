//! The shadow tree type.
//!
//! A [`Shadow<V>`] has the same nesting as the subject it mirrors, but each
//! leaf holds a tracked value of type `V` (a touched flag, a list of error
//! messages, ...) instead of data.

use indexmap::IndexMap;
use serde::{Serialize, Serializer};

use crate::{
    nested::{NodeKind, Nested, SlotError, grown_len},
    path::{Key, KeyPath},
};

/// A node of a shadow tree.
///
/// Serializes as plain JSON-like structure: maps as objects, lists as arrays,
/// leaves as `V`, vacant slots as `null`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shadow<V> {
    /// Tracked value for one field.
    Leaf(V),
    /// Named children, in insertion order.
    Map(IndexMap<String, Shadow<V>>),
    /// Indexed children.
    List(Vec<Shadow<V>>),
    /// List hole.
    Vacant,
}

impl<V> Default for Shadow<V> {
    fn default() -> Self {
        Shadow::Vacant
    }
}

impl<V> Shadow<V> {
    /// Returns the tracked value if this node is a leaf.
    pub fn as_leaf(&self) -> Option<&V> {
        match self {
            Shadow::Leaf(v) => Some(v),
            _ => None,
        }
    }

    /// Mutable counterpart of [`Shadow::as_leaf`].
    pub fn as_leaf_mut(&mut self) -> Option<&mut V> {
        match self {
            Shadow::Leaf(v) => Some(v),
            _ => None,
        }
    }

    /// Returns true if this node is a leaf
    pub fn is_leaf(&self) -> bool {
        matches!(self, Shadow::Leaf(_))
    }

    /// Returns the type name as a string
    pub fn type_name(&self) -> &'static str {
        match self {
            Shadow::Leaf(_) => "leaf",
            Shadow::Map(_) => "map",
            Shadow::List(_) => "list",
            Shadow::Vacant => "vacant",
        }
    }

    /// Calls `f` on every leaf value, depth first.
    pub fn for_each_leaf_mut(&mut self, f: &mut impl FnMut(&mut V)) {
        match self {
            Shadow::Leaf(v) => f(v),
            Shadow::Map(children) => children.values_mut().for_each(|c| c.for_each_leaf_mut(f)),
            Shadow::List(items) => items.iter_mut().for_each(|c| c.for_each_leaf_mut(f)),
            Shadow::Vacant => {}
        }
    }

    /// Every leaf with its path, depth first in enumeration order.
    pub fn leaves(&self) -> Vec<(KeyPath, &V)> {
        let mut out = Vec::new();
        let mut path = KeyPath::root();
        self.collect_leaves(&mut path, &mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, path: &mut KeyPath, out: &mut Vec<(KeyPath, &'a V)>) {
        match self {
            Shadow::Leaf(v) => out.push((path.clone(), v)),
            Shadow::Map(children) => {
                for (name, child) in children {
                    path.push(Key::Field(name.clone()));
                    child.collect_leaves(path, out);
                    path.pop();
                }
            }
            Shadow::List(items) => {
                for (i, child) in items.iter().enumerate() {
                    path.push(Key::Index(i));
                    child.collect_leaves(path, out);
                    path.pop();
                }
            }
            Shadow::Vacant => {}
        }
    }

    /// Number of leaves.
    pub fn leaf_count(&self) -> usize {
        match self {
            Shadow::Leaf(_) => 1,
            Shadow::Map(children) => children.values().map(Shadow::leaf_count).sum(),
            Shadow::List(items) => items.iter().map(Shadow::leaf_count).sum(),
            Shadow::Vacant => 0,
        }
    }
}

impl<V> Nested for Shadow<V> {
    fn kind(&self) -> NodeKind {
        match self {
            Shadow::Leaf(_) => NodeKind::Leaf,
            Shadow::Map(_) => NodeKind::Map,
            Shadow::List(_) => NodeKind::List,
            Shadow::Vacant => NodeKind::Vacant,
        }
    }

    fn new_map() -> Self {
        Shadow::Map(IndexMap::new())
    }

    fn new_list() -> Self {
        Shadow::List(Vec::new())
    }

    fn vacant() -> Self {
        Shadow::Vacant
    }

    fn child(&self, key: &Key) -> Option<&Self> {
        let child = match self {
            Shadow::Map(children) => children.get(key.to_segment().as_str()),
            Shadow::List(items) => items.get(key.as_index()?),
            _ => None,
        }?;
        // Holes read as absent
        (!matches!(child, Shadow::Vacant)).then_some(child)
    }

    fn child_mut(&mut self, key: &Key) -> Option<&mut Self> {
        let child = match self {
            Shadow::Map(children) => children.get_mut(key.to_segment().as_str()),
            Shadow::List(items) => items.get_mut(key.as_index()?),
            _ => None,
        }?;
        (!matches!(child, Shadow::Vacant)).then_some(child)
    }

    fn slot_mut(&mut self, key: &Key) -> Result<&mut Self, SlotError> {
        match self {
            Shadow::Map(children) => Ok(children.entry(key.to_segment()).or_insert(Shadow::Vacant)),
            Shadow::List(items) => {
                let index = key.as_index().ok_or(SlotError::FieldOnList)?;
                let len = grown_len(items.len(), index)?;
                items.resize_with(len, || Shadow::Vacant);
                Ok(&mut items[index])
            }
            Shadow::Leaf(_) => Err(SlotError::NotContainer),
            Shadow::Vacant => Err(SlotError::NotContainer),
        }
    }

    fn children(&self) -> Box<dyn Iterator<Item = (Key, &Self)> + '_> {
        match self {
            Shadow::Map(children) => Box::new(
                children
                    .iter()
                    .map(|(k, v)| (Key::Field(k.clone()), v)),
            ),
            Shadow::List(items) => Box::new(
                items
                    .iter()
                    .enumerate()
                    .filter(|(_, v)| !matches!(v, Shadow::Vacant))
                    .map(|(i, v)| (Key::Index(i), v)),
            ),
            _ => Box::new(std::iter::empty()),
        }
    }
}

impl<V: Serialize> Serialize for Shadow<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Shadow::Leaf(v) => v.serialize(serializer),
            Shadow::Map(children) => children.serialize(serializer),
            Shadow::List(items) => items.serialize(serializer),
            Shadow::Vacant => serializer.serialize_unit(),
        }
    }
}
