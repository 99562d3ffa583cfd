//! Form state built from three mutation trackers.
//!
//! # Core Types
//!
//! - [`FormState`] - per-field touched/dirty/error state plus form-wide checks
//! - [`FormStateTrackers`] - the touched, dirty and error trackers
//! - [`FormConfig`] - initial touched/dirty fields and the path separator
//! - [`ValidationMessage`] / [`Validator`] - the validator boundary
//! - [`FieldState`] - everything known about one field

pub mod config;
pub mod errors;
pub mod message;
pub mod state;
pub mod trackers;

pub use config::FormConfig;
pub use errors::FormError;
pub use message::{FieldState, ValidationMessage, Validator};
pub use state::FormState;
pub use trackers::FormStateTrackers;
