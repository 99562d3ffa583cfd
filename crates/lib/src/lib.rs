//!
//! formstate: per-field metadata that shadows the shape of a nested document.
//!
//! Forms need to remember things *about* their fields (was it touched, has it
//! changed, what is wrong with it) without storing that next to the data. This
//! library keeps that metadata in a parallel "shadow tree" with the same shape
//! as the document, addressed by dotted paths.
//!
//! ## Core Concepts
//!
//! * **Paths (`path::KeyPath`)**: A sequence of field names and list indices. `"a.c.0"` is its string form.
//! * **Nested trees (`nested::Nested`)**: The map / list / leaf abstraction all algorithms walk. Implemented for `serde_json::Value` and for shadow trees.
//! * **Deep access (`access`)**: `get_deep` / `set_deep` by path, creating intermediate containers on write.
//! * **Flattening (`flatten`)**: Path-keyed leaf listings, as an ordered map or an ordered sequence.
//! * **Freezing (`freeze::Frozen`)**: Read-only shared snapshots.
//! * **Trackers (`tracker::MutationTracker`)**: A shadow tree with one value per leaf of a subject, a default value, and an initial seed.
//! * **Forms (`form::FormState`)**: Touched, dirty and error trackers over one subject, plus validator error folding.

pub mod access;
pub mod flatten;
pub mod form;
pub mod freeze;
pub mod nested;
pub mod path;
pub mod shadow;
pub mod tracker;

pub use access::{get_deep, set_deep};
pub use flatten::{FlatEntry, flatten_object, flatten_object_to_array};
pub use freeze::{Frozen, deep_freeze};
pub use nested::Nested;
pub use path::{Key, KeyPath};
pub use shadow::Shadow;
pub use tracker::{MutationTracker, SharedTracker, TrackerOptions};

/// Result type used throughout the formstate library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the formstate library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Malformed path input
    #[error(transparent)]
    Path(path::PathError),

    /// Structured errors from deep writes
    #[error(transparent)]
    Access(access::AccessError),

    /// Structured errors from the form layer
    #[error(transparent)]
    Form(form::FormError),
}

impl From<path::PathError> for Error {
    fn from(err: path::PathError) -> Self {
        Error::Path(err)
    }
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Path(_) => "path",
            Error::Access(_) => "access",
            Error::Form(_) => "form",
            Error::Io(_) => "io",
            Error::Serialize(_) => "serialize",
        }
    }

    /// Check if this error comes from a malformed path.
    pub fn is_path_error(&self) -> bool {
        matches!(self, Error::Path(_))
    }

    /// Check if this error comes from writing through a leaf.
    pub fn is_shape_traversal(&self) -> bool {
        match self {
            Error::Access(access_err) => access_err.is_shape_traversal(),
            _ => false,
        }
    }

    /// Check if this error is about form configuration.
    pub fn is_config_error(&self) -> bool {
        match self {
            Error::Form(form_err) => form_err.is_config_error(),
            _ => false,
        }
    }

    /// Check if this error is I/O related.
    pub fn is_io_error(&self) -> bool {
        matches!(self, Error::Io(_))
    }
}
