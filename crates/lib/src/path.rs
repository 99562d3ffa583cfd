//! Path types for addressing locations inside nested structures.
//!
//! A [`KeyPath`] is the canonical form: an ordered sequence of [`Key`]s, each
//! either a map field or a list index. The dotted string (`"a.b.0.c"`) is only
//! an encoding of it, produced by [`KeyPath::encode`] and parsed by
//! [`KeyPath::decode`].
//!
//! # Usage
//!
//! ```rust
//! use formstate::path::{Key, KeyPath};
//!
//! let path: KeyPath = "user.emails.0".parse()?;
//! assert_eq!(path.keys(), &[Key::from("user"), Key::from("emails"), Key::Index(0)]);
//! assert_eq!(path.encode('/'), "user/emails/0");
//!
//! // Build incrementally
//! let path = KeyPath::root().with_field("user").with_index(2);
//! assert_eq!(path.to_string(), "user.2");
//! # Ok::<(), formstate::path::PathError>(())
//! ```

use std::{fmt, str::FromStr};

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Separator used when none is configured.
pub const DEFAULT_SEPARATOR: char = '.';

/// Error type for malformed path input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathError {
    /// A segment between two separators (or at either end) was empty.
    #[error("Empty segment at position {position} in path '{path}'")]
    EmptySegment { path: String, position: usize },

    /// A numeric segment does not fit in a list index.
    #[error("Index segment '{segment}' in path '{path}' is out of range")]
    IndexOverflow { path: String, segment: String },

    /// A field key contains the separator.
    #[error("Invalid key '{key}': {reason}")]
    InvalidKey { key: String, reason: String },
}

impl PathError {
    /// The offending path or key text.
    pub fn input(&self) -> &str {
        match self {
            PathError::EmptySegment { path, .. } | PathError::IndexOverflow { path, .. } => path,
            PathError::InvalidKey { key, .. } => key,
        }
    }
}

/// A single step of a [`KeyPath`].
///
/// Ordering and equality are structural: `Key::Field("0")` and `Key::Index(0)`
/// are different keys, even though both encode to `"0"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    /// Named field of a map.
    Field(String),
    /// Position in a list.
    Index(usize),
}

impl Key {
    /// Creates a field key, rejecting keys that contain the default separator.
    pub fn field(name: impl Into<String>) -> Result<Self, PathError> {
        Self::field_for(name, DEFAULT_SEPARATOR)
    }

    /// Creates a field key for paths encoded with `separator`.
    ///
    /// Empty keys and keys containing `separator` are rejected: neither
    /// survives an encode/decode round trip.
    pub fn field_for(name: impl Into<String>, separator: char) -> Result<Self, PathError> {
        let name = name.into();
        if name.is_empty() {
            return Err(PathError::InvalidKey {
                key: name,
                reason: "keys cannot be empty".to_string(),
            });
        }
        if name.contains(separator) {
            return Err(PathError::InvalidKey {
                reason: format!("keys cannot contain '{separator}'"),
                key: name,
            });
        }
        Ok(Key::Field(name))
    }

    /// Returns `true` if this key encodes to a segment that decodes back to
    /// the same location under `separator`.
    pub fn is_encodable(&self, separator: char) -> bool {
        match self {
            Key::Index(_) => true,
            Key::Field(name) => !name.is_empty() && !name.contains(separator),
        }
    }

    /// Returns the list index this key addresses, if any.
    ///
    /// Field keys made only of ASCII digits also address an index, so paths
    /// built by hand behave the same as decoded ones when they hit a list.
    pub fn as_index(&self) -> Option<usize> {
        match self {
            Key::Index(i) => Some(*i),
            Key::Field(name) if is_index_segment(name) => name.parse().ok(),
            Key::Field(_) => None,
        }
    }

    /// Returns `true` for [`Key::Index`].
    pub fn is_index(&self) -> bool {
        matches!(self, Key::Index(_))
    }

    /// The key as it appears in an encoded path.
    pub fn to_segment(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Field(name) => f.write_str(name),
            Key::Index(i) => write!(f, "{i}"),
        }
    }
}

impl From<usize> for Key {
    fn from(index: usize) -> Self {
        Key::Index(index)
    }
}

impl From<&str> for Key {
    fn from(name: &str) -> Self {
        Key::Field(name.to_string())
    }
}

impl From<String> for Key {
    fn from(name: String) -> Self {
        Key::Field(name)
    }
}

fn is_index_segment(segment: &str) -> bool {
    !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit())
}

/// An owned sequence of keys addressing one location in a nested structure.
///
/// The empty path addresses the root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyPath {
    keys: Vec<Key>,
}

impl KeyPath {
    /// The empty path.
    pub fn root() -> Self {
        Self::default()
    }

    /// Creates a path from an explicit key sequence.
    pub fn from_keys(keys: impl IntoIterator<Item = Key>) -> Self {
        Self {
            keys: keys.into_iter().collect(),
        }
    }

    /// Parses `path`, splitting on `separator`.
    ///
    /// Segments made only of ASCII digits become [`Key::Index`]; everything else
    /// becomes [`Key::Field`]. The empty string is the root path.
    ///
    /// # Errors
    /// Fails on empty segments (`"a..b"`, `".a"`, `"a."`) and on numeric
    /// segments too large for `usize`.
    pub fn decode(path: &str, separator: char) -> Result<Self, PathError> {
        if path.is_empty() {
            return Ok(Self::root());
        }

        let mut keys = Vec::new();
        for (position, segment) in path.split(separator).enumerate() {
            if segment.is_empty() {
                return Err(PathError::EmptySegment {
                    path: path.to_string(),
                    position,
                });
            }
            if is_index_segment(segment) {
                let index = segment.parse().map_err(|_| PathError::IndexOverflow {
                    path: path.to_string(),
                    segment: segment.to_string(),
                })?;
                keys.push(Key::Index(index));
            } else {
                keys.push(Key::Field(segment.to_string()));
            }
        }
        Ok(Self { keys })
    }

    /// Joins the keys with `separator`.
    pub fn encode(&self, separator: char) -> String {
        let mut out = String::new();
        for (i, key) in self.keys.iter().enumerate() {
            if i > 0 {
                out.push(separator);
            }
            match key {
                Key::Field(name) => out.push_str(name),
                Key::Index(index) => out.push_str(&index.to_string()),
            }
        }
        out
    }

    /// Appends a key in place.
    pub fn push(&mut self, key: impl Into<Key>) {
        self.keys.push(key.into());
    }

    /// Removes and returns the last key.
    pub fn pop(&mut self) -> Option<Key> {
        self.keys.pop()
    }

    /// Returns a new path extended by a field key.
    pub fn with_field(mut self, name: impl Into<String>) -> Self {
        self.keys.push(Key::Field(name.into()));
        self
    }

    /// Returns a new path extended by a list index.
    pub fn with_index(mut self, index: usize) -> Self {
        self.keys.push(Key::Index(index));
        self
    }

    /// Returns a new path extended by `key`.
    pub fn join(&self, key: impl Into<Key>) -> Self {
        let mut joined = self.clone();
        joined.push(key);
        joined
    }

    /// The path without its last key, or `None` for the root.
    pub fn parent(&self) -> Option<KeyPath> {
        let (_, init) = self.keys.split_last()?;
        Some(KeyPath {
            keys: init.to_vec(),
        })
    }

    /// The last key, or `None` for the root.
    pub fn last(&self) -> Option<&Key> {
        self.keys.last()
    }

    /// The keys as a slice.
    pub fn keys(&self) -> &[Key] {
        &self.keys
    }

    /// Iterates over the keys.
    pub fn iter(&self) -> std::slice::Iter<'_, Key> {
        self.keys.iter()
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns `true` for the root path.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Returns `true` if every key is encodable under `separator`, so that
    /// `decode(encode(path))` addresses the same location.
    pub fn is_encodable(&self, separator: char) -> bool {
        self.keys.iter().all(|key| key.is_encodable(separator))
    }

    /// Returns `true` if `prefix` is a leading part of this path.
    pub fn starts_with(&self, prefix: &KeyPath) -> bool {
        self.keys.starts_with(&prefix.keys)
    }
}

impl FromStr for KeyPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::decode(s, DEFAULT_SEPARATOR)
    }
}

impl TryFrom<&str> for KeyPath {
    type Error = PathError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::decode(s, DEFAULT_SEPARATOR)
    }
}

impl From<Vec<Key>> for KeyPath {
    fn from(keys: Vec<Key>) -> Self {
        Self { keys }
    }
}

impl FromIterator<Key> for KeyPath {
    fn from_iter<I: IntoIterator<Item = Key>>(iter: I) -> Self {
        Self::from_keys(iter)
    }
}

impl<'a> IntoIterator for &'a KeyPath {
    type Item = &'a Key;
    type IntoIter = std::slice::Iter<'a, Key>;

    fn into_iter(self) -> Self::IntoIter {
        self.keys.iter()
    }
}

impl AsRef<KeyPath> for KeyPath {
    fn as_ref(&self) -> &KeyPath {
        self
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.keys.is_empty() {
            write!(f, "(root)")
        } else {
            f.write_str(&self.encode(DEFAULT_SEPARATOR))
        }
    }
}

impl Serialize for KeyPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.encode(DEFAULT_SEPARATOR))
    }
}

/// Single-literal arguments accepted by [`keypath!`].
#[doc(hidden)]
pub trait PathLiteral {
    fn into_key_path(self) -> KeyPath;
}

impl PathLiteral for &str {
    // Literal paths are written by the programmer, so a malformed one panics.
    fn into_key_path(self) -> KeyPath {
        match KeyPath::decode(self, DEFAULT_SEPARATOR) {
            Ok(path) => path,
            Err(e) => panic!("invalid path literal: {e}"),
        }
    }
}

impl PathLiteral for usize {
    fn into_key_path(self) -> KeyPath {
        KeyPath::root().with_index(self)
    }
}

/// Builds a [`KeyPath`] from keys.
///
/// String-like arguments become field keys and `usize` arguments become list
/// indices. A single string literal is decoded as a dotted path; a single
/// `usize` literal is a one-index path.
///
/// ```rust
/// use formstate::{keypath, path::Key};
///
/// let p = keypath!("address", "lines", 1usize);
/// assert_eq!(p.keys()[2], Key::Index(1));
///
/// let q = keypath!("address.lines.1");
/// assert_eq!(p, q);
///
/// assert!(keypath!().is_empty());
/// ```
#[macro_export]
macro_rules! keypath {
    () => {
        $crate::path::KeyPath::root()
    };

    ($single:literal) => {
        $crate::path::PathLiteral::into_key_path($single)
    };

    ($first:expr $(, $rest:expr)* $(,)?) => {{
        let mut path = $crate::path::KeyPath::root();
        path.push($crate::path::Key::from($first));
        $(
            path.push($crate::path::Key::from($rest));
        )*
        path
    }};
}
