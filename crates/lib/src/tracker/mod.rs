//! The mutation tracking engine.
//!
//! A [`MutationTracker<V>`] scans the shape of a subject once, builds a
//! [`Shadow<V>`] with one leaf per leaf path of the subject, and then answers
//! path-addressed reads and writes against that shadow tree. The subject is
//! only borrowed during construction and never changed.
//!
//! # Usage
//!
//! ```
//! use formstate::tracker::{MutationTracker, TrackerOptions};
//! use serde_json::json;
//!
//! let subject = json!({"a": {"b": 1, "c": [2, 3]}});
//! let mut touched = MutationTracker::new(
//!     &subject,
//!     TrackerOptions::new(false).with_initial_mutation(["a.b"], true),
//! );
//!
//! assert_eq!(*touched.get_mutated_by_attribute_name("a.b")?, true);
//! assert_eq!(*touched.get_mutated_by_attribute_name("a.c.0")?, false);
//!
//! touched.set_mutated_by_attribute_name(true, "a.c.1")?;
//! touched.clear();
//! assert_eq!(*touched.get_mutated_by_attribute_name("a.b")?, false);
//!
//! touched.reset();
//! assert_eq!(*touched.get_mutated_by_attribute_name("a.b")?, true);
//! # Ok::<(), formstate::Error>(())
//! ```

use std::{fmt, sync::Arc};

use tracing::{debug, trace, warn};

use crate::{
    Result,
    access::{get_deep, get_deep_mut, set_deep},
    flatten::encodable_leaf_paths,
    freeze::{Frozen, deep_freeze},
    nested::{Nested, NodeKind},
    path::{DEFAULT_SEPARATOR, KeyPath},
    shadow::Shadow,
};

pub mod shared;

pub use shared::SharedTracker;

/// Construction-time seed: paths that start with `mutated_value` instead of
/// the default.
#[derive(Debug, Clone, PartialEq)]
pub struct InitialMutation<V> {
    pub mutated_attributes: Vec<String>,
    pub mutated_value: V,
}

/// Options for building a [`MutationTracker`].
#[derive(Debug, Clone)]
pub struct TrackerOptions<V> {
    pub default_value: V,
    pub initial_mutation: Option<InitialMutation<V>>,
    pub separator: char,
}

impl<V> TrackerOptions<V> {
    /// Options with the given default and no seed.
    pub fn new(default_value: V) -> Self {
        Self {
            default_value,
            initial_mutation: None,
            separator: DEFAULT_SEPARATOR,
        }
    }

    /// Seeds `attributes` with `value` at construction.
    pub fn with_initial_mutation<I, S>(mut self, attributes: I, value: V) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.initial_mutation = Some(InitialMutation {
            mutated_attributes: attributes.into_iter().map(Into::into).collect(),
            mutated_value: value,
        });
        self
    }

    /// Sets the separator for every string path the tracker accepts.
    pub fn with_separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }
}

/// Tracks one value of type `V` per leaf of a subject's shape.
///
/// Reads of unknown paths return the default value; writes create the path
/// if needed. The tree lives behind an [`Arc`] so [`MutationTracker::state`]
/// can hand out frozen snapshots without copying; the next write after a
/// snapshot copies the tree once.
///
/// Cloning is cheap: the clone shares both trees until one side writes.
#[derive(Clone)]
pub struct MutationTracker<V> {
    tree: Arc<Shadow<V>>,
    /// Tree as built at construction, restored by `reset`.
    seed: Arc<Shadow<V>>,
    default_value: V,
    initial_mutation: Option<InitialMutation<V>>,
    separator: char,
}

impl<V: Clone> MutationTracker<V> {
    /// Builds a tracker mirroring the shape of `subject`.
    ///
    /// The shadow root has the subject root's kind, so an empty object
    /// subject gives an empty map that later writes can extend. Subject keys
    /// that cannot be encoded with the separator are skipped. Seed paths that
    /// are malformed, absent from the shape, or name a container rather than
    /// a leaf are skipped.
    pub fn new<T: Nested>(subject: &T, options: TrackerOptions<V>) -> Self {
        let root = match subject.kind() {
            NodeKind::Map => Shadow::new_map(),
            NodeKind::List => Shadow::new_list(),
            NodeKind::Leaf | NodeKind::Vacant => Shadow::Vacant,
        };
        let paths = encodable_leaf_paths(subject, options.separator)
            .into_iter()
            .map(|(path, _)| path);
        Self::build(root, paths, options)
    }

    /// Builds a tracker from an explicit list of leaf paths.
    ///
    /// # Errors
    /// Fails if a path is malformed or if two paths conflict (one descends
    /// through the other).
    pub fn from_paths<I, S>(paths: I, options: TrackerOptions<V>) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut decoded = Vec::new();
        for path in paths {
            decoded.push(KeyPath::decode(path.as_ref(), options.separator)?);
        }

        // Surface conflicts before building; `build` assumes a consistent shape
        let mut shape: Shadow<()> = Shadow::Vacant;
        for path in &decoded {
            set_deep(&mut shape, Shadow::Leaf(()), path)?;
        }

        Ok(Self::build(Shadow::Vacant, decoded, options))
    }

    fn build(
        mut tree: Shadow<V>,
        paths: impl IntoIterator<Item = KeyPath>,
        options: TrackerOptions<V>,
    ) -> Self {
        let TrackerOptions {
            default_value,
            initial_mutation,
            separator,
        } = options;

        let mut leaf_count = 0usize;
        for path in paths {
            match set_deep(&mut tree, Shadow::Leaf(default_value.clone()), &path) {
                Ok(_) => leaf_count += 1,
                Err(e) => warn!(path = %path, error = %e, "Skipping leaf that conflicts with shape"),
            }
        }

        if let Some(seed) = &initial_mutation {
            for attribute in &seed.mutated_attributes {
                let leaf = match KeyPath::decode(attribute, separator) {
                    Ok(path) => get_deep_mut(&mut tree, &path).and_then(Shadow::as_leaf_mut),
                    Err(_) => None,
                };
                match leaf {
                    Some(slot) => *slot = seed.mutated_value.clone(),
                    None => warn!(
                        attribute = %attribute,
                        "Ignoring initial mutation for path not in subject shape"
                    ),
                }
            }
        }

        debug!(
            leaves = leaf_count,
            seeded = initial_mutation
                .as_ref()
                .map_or(0, |m| m.mutated_attributes.len()),
            "Built mutation tracker"
        );

        let tree = Arc::new(tree);
        Self {
            seed: Arc::clone(&tree),
            tree,
            default_value,
            initial_mutation,
            separator,
        }
    }

    /// Value at `path`, or the default when the path is absent or names a
    /// container.
    ///
    /// # Errors
    /// Fails only if `path` is malformed.
    pub fn get_mutated_by_attribute_name(&self, path: &str) -> Result<&V> {
        let path = self.decode(path)?;
        Ok(self.get_at(&path))
    }

    /// [`Self::get_mutated_by_attribute_name`] for an already decoded path.
    pub fn get_at(&self, path: &KeyPath) -> &V {
        get_deep(self.tree.as_ref(), path)
            .and_then(Shadow::as_leaf)
            .unwrap_or(&self.default_value)
    }

    /// Writes `value` at `path`, creating the path if it is not part of the
    /// shape yet.
    ///
    /// # Errors
    /// Fails if `path` is malformed or would descend through an existing leaf.
    pub fn set_mutated_by_attribute_name(&mut self, value: V, path: &str) -> Result<()> {
        let path = self.decode(path)?;
        self.set_at(value, &path)
    }

    /// [`Self::set_mutated_by_attribute_name`] for an already decoded path.
    pub fn set_at(&mut self, value: V, path: &KeyPath) -> Result<()> {
        trace!(path = %path, "Setting tracked value");
        set_deep(Arc::make_mut(&mut self.tree), Shadow::Leaf(value), path)?;
        Ok(())
    }

    /// Writes the same `value` at every path, in order.
    ///
    /// Not atomic: paths before a failing one stay written.
    pub fn set_mutated_by_attribute_names<I, S>(&mut self, value: V, paths: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for path in paths {
            self.set_mutated_by_attribute_name(value.clone(), path.as_ref())?;
        }
        Ok(())
    }

    /// Overwrites every existing leaf with `value`. Adds no leaves.
    pub fn set_all(&mut self, value: V) {
        debug!(leaves = self.tree.leaf_count(), "Setting all tracked values");
        Arc::make_mut(&mut self.tree).for_each_leaf_mut(&mut |leaf| *leaf = value.clone());
    }

    /// Returns every existing leaf to the default value.
    pub fn clear(&mut self) {
        let default_value = self.default_value.clone();
        self.set_all(default_value);
    }

    /// Restores the tree built at construction, initial mutations included.
    ///
    /// Leaves added after construction are dropped.
    pub fn reset(&mut self) {
        debug!("Resetting mutation tracker to its initial state");
        self.tree = Arc::clone(&self.seed);
    }

    /// The live shadow tree as a frozen snapshot.
    ///
    /// The snapshot shares storage with the tracker; a later write leaves it
    /// untouched and is visible through the next call.
    pub fn state(&self) -> Frozen<Shadow<V>> {
        deep_freeze(Arc::clone(&self.tree))
    }

    /// Every leaf with its path, in traversal order.
    pub fn leaves(&self) -> Vec<(KeyPath, &V)> {
        self.tree.leaves()
    }

    /// Returns `true` if any leaf satisfies `predicate`.
    pub fn any(&self, mut predicate: impl FnMut(&V) -> bool) -> bool {
        self.tree.leaves().into_iter().any(|(_, v)| predicate(v))
    }

    fn decode(&self, path: &str) -> Result<KeyPath> {
        Ok(KeyPath::decode(path, self.separator)?)
    }
}

impl<V> MutationTracker<V> {
    /// Paths seeded at construction.
    pub fn initially_mutated_attributes(&self) -> &[String] {
        self.initial_mutation
            .as_ref()
            .map_or(&[], |m| m.mutated_attributes.as_slice())
    }

    /// Value seeded at construction, if a seed was given.
    pub fn initially_mutated_value(&self) -> Option<&V> {
        self.initial_mutation.as_ref().map(|m| &m.mutated_value)
    }

    /// Value of every leaf nobody has written.
    pub fn default_value(&self) -> &V {
        &self.default_value
    }

    /// Separator used to decode string paths.
    pub fn separator(&self) -> char {
        self.separator
    }
}

impl<V: fmt::Debug> fmt::Debug for MutationTracker<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MutationTracker")
            .field("tree", &self.tree)
            .field("default_value", &self.default_value)
            .field("initial_mutation", &self.initial_mutation)
            .field("separator", &self.separator)
            .finish()
    }
}
