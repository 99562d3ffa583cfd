//! Read-only shared snapshots.
//!
//! [`Frozen<T>`] hands out a value without handing out the right to change it:
//! it only implements [`Deref`], so nothing reachable through it (however
//! deeply nested) can be written. Clones share the same allocation.
//!
//! ```
//! use formstate::freeze::deep_freeze;
//! use serde_json::json;
//!
//! let frozen = deep_freeze(json!({"a": {"b": 1}}));
//! let again = deep_freeze(frozen.clone());
//! assert!(frozen.ptr_eq(&again));
//!
//! let mut copy = frozen.clone().thaw();
//! copy["a"]["b"] = json!(2);
//! assert_eq!(frozen["a"]["b"], json!(1));
//! ```

use std::{fmt, ops::Deref, sync::Arc};

use serde::{Serialize, Serializer};

use crate::shadow::Shadow;

/// An immutable, cheaply clonable view of a `T`.
pub struct Frozen<T> {
    inner: Arc<T>,
}

impl<T> Frozen<T> {
    /// Freezes `value`.
    pub fn new(value: T) -> Self {
        Self {
            inner: Arc::new(value),
        }
    }

    /// Wraps an already shared value without copying it.
    pub fn from_arc(inner: Arc<T>) -> Self {
        Self { inner }
    }

    /// Returns `true` if both handles point at the same allocation.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Gives back an owned, writable `T`.
    ///
    /// Clones the value when other handles still share it, so writes to the
    /// result are never visible through them.
    pub fn thaw(self) -> T
    where
        T: Clone,
    {
        Arc::unwrap_or_clone(self.inner)
    }
}

impl<T> Clone for Frozen<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> Deref for Frozen<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.inner
    }
}

impl<T> AsRef<T> for Frozen<T> {
    fn as_ref(&self) -> &T {
        &self.inner
    }
}

impl<T: fmt::Debug> fmt::Debug for Frozen<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Frozen").field(&*self.inner).finish()
    }
}

impl<T: PartialEq> PartialEq for Frozen<T> {
    fn eq(&self, other: &Self) -> bool {
        *self.inner == *other.inner
    }
}

impl<T: Eq> Eq for Frozen<T> {}

impl<T: Serialize> Serialize for Frozen<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.inner.serialize(serializer)
    }
}

/// Values that [`deep_freeze`] accepts.
pub trait IntoFrozen {
    /// The type behind the resulting [`Frozen`] handle.
    type Target;

    /// Converts into a frozen handle.
    fn into_frozen(self) -> Frozen<Self::Target>;
}

impl<T> IntoFrozen for Frozen<T> {
    type Target = T;

    fn into_frozen(self) -> Frozen<T> {
        self
    }
}

impl<T> IntoFrozen for Arc<T> {
    type Target = T;

    fn into_frozen(self) -> Frozen<T> {
        Frozen::from_arc(self)
    }
}

impl IntoFrozen for serde_json::Value {
    type Target = serde_json::Value;

    fn into_frozen(self) -> Frozen<serde_json::Value> {
        Frozen::new(self)
    }
}

impl<V> IntoFrozen for Shadow<V> {
    type Target = Shadow<V>;

    fn into_frozen(self) -> Frozen<Shadow<V>> {
        Frozen::new(self)
    }
}

/// Makes `value` and everything reachable from it read-only.
///
/// Idempotent: freezing a [`Frozen`] returns the same handle.
pub fn deep_freeze<F: IntoFrozen>(value: F) -> Frozen<F::Target> {
    value.into_frozen()
}
