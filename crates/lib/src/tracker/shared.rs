//! A tracker handle that can be shared across threads.
//!
//! [`SharedTracker`] puts one [`MutationTracker`] behind one mutex. Every
//! operation takes the lock for its whole duration, so reads always see the
//! latest completed write.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::{Result, freeze::Frozen, nested::Nested, shadow::Shadow};

use super::{MutationTracker, TrackerOptions};

/// Clonable, thread-safe handle to a [`MutationTracker`].
///
/// Clones refer to the same tracker.
#[derive(Debug)]
pub struct SharedTracker<V> {
    inner: Arc<Mutex<MutationTracker<V>>>,
}

impl<V> Clone for SharedTracker<V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<V: Clone> SharedTracker<V> {
    /// Builds a tracker over `subject` and wraps it.
    pub fn new<T: Nested>(subject: &T, options: TrackerOptions<V>) -> Self {
        Self::from_tracker(MutationTracker::new(subject, options))
    }

    /// Wraps an existing tracker.
    pub fn from_tracker(tracker: MutationTracker<V>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(tracker)),
        }
    }

    // Every operation leaves the tree consistent, so a panic in another
    // holder does not invalidate the state.
    fn lock(&self) -> MutexGuard<'_, MutationTracker<V>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Owned copy of the value at `path`.
    pub fn get_mutated_by_attribute_name(&self, path: &str) -> Result<V> {
        self.lock().get_mutated_by_attribute_name(path).cloned()
    }

    /// See [`MutationTracker::set_mutated_by_attribute_name`].
    pub fn set_mutated_by_attribute_name(&self, value: V, path: &str) -> Result<()> {
        self.lock().set_mutated_by_attribute_name(value, path)
    }

    /// See [`MutationTracker::set_mutated_by_attribute_names`].
    pub fn set_mutated_by_attribute_names<I, S>(&self, value: V, paths: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.lock().set_mutated_by_attribute_names(value, paths)
    }

    /// See [`MutationTracker::set_all`].
    pub fn set_all(&self, value: V) {
        self.lock().set_all(value);
    }

    /// See [`MutationTracker::clear`].
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// See [`MutationTracker::reset`].
    pub fn reset(&self) {
        self.lock().reset();
    }

    /// Frozen snapshot of the tree at the time of the call.
    pub fn state(&self) -> Frozen<Shadow<V>> {
        self.lock().state()
    }

    /// Runs `f` with exclusive access to the tracker.
    pub fn with<R>(&self, f: impl FnOnce(&mut MutationTracker<V>) -> R) -> R {
        f(&mut self.lock())
    }
}
