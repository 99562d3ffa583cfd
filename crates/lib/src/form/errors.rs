//! Error types for the form layer.

use thiserror::Error;

/// Structured errors for form configuration.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum FormError {
    /// The configuration is well-formed JSON but not usable.
    #[error("Invalid form configuration: {reason}")]
    InvalidConfig { reason: String },

    /// The configuration file could not be read or parsed.
    #[error("Failed to load form configuration from '{path}': {reason}")]
    ConfigLoad { path: String, reason: String },
}

impl FormError {
    /// Check if this error is about configuration contents or loading.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            FormError::InvalidConfig { .. } | FormError::ConfigLoad { .. }
        )
    }
}

impl From<FormError> for crate::Error {
    fn from(err: FormError) -> Self {
        crate::Error::Form(err)
    }
}
