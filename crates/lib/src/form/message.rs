//! Records exchanged with validators and callers.

use serde::{Deserialize, Serialize};

/// One validation error reported for one field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ValidationMessage {
    /// Path of the field, in the form's separator.
    pub key: String,
    /// Human-readable message.
    pub message: String,
}

impl ValidationMessage {
    pub fn new(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            message: message.into(),
        }
    }
}

/// Everything known about one field, as returned by
/// [`crate::form::FormState::field_state`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldState<T> {
    pub name: String,
    pub current_value: T,
    pub previous_value: T,
    pub touched: bool,
    pub dirty: bool,
    pub is_valid: bool,
    pub errors: Vec<String>,
}

/// Produces validation messages for a subject.
///
/// Implemented for any `Fn(&serde_json::Value) -> Vec<ValidationMessage>`.
/// Running a validator asynchronously is up to the caller; the form only
/// folds the messages it returns.
pub trait Validator {
    /// Validates `subject`, returning one message per problem found.
    fn validate(&self, subject: &serde_json::Value) -> Vec<ValidationMessage>;
}

impl<F> Validator for F
where
    F: Fn(&serde_json::Value) -> Vec<ValidationMessage>,
{
    fn validate(&self, subject: &serde_json::Value) -> Vec<ValidationMessage> {
        self(subject)
    }
}
