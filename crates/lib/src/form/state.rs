//! Form-level state on top of the three trackers.
//!
//! [`FormState`] is what a presentation layer talks to: it reads and writes
//! touched/dirty flags per field, folds validator output into per-field error
//! lists, and answers form-wide questions (any field dirty? any error?).
//!
//! ```
//! use formstate::form::{FormConfig, FormState, ValidationMessage};
//! use serde_json::json;
//!
//! let subject = json!({"name": "", "address": {"city": ""}});
//! let mut form = FormState::new(&subject, &FormConfig::default())?;
//!
//! form.set_field_touched(true, "name")?;
//! form.set_errors_all(vec![ValidationMessage::new("address.city", "required")])?;
//!
//! assert!(form.is_form_touched());
//! assert!(!form.is_form_valid());
//! assert_eq!(form.field_errors("address.city")?, vec!["required".to_string()]);
//! # Ok::<(), formstate::Error>(())
//! ```

use indexmap::IndexMap;
use tracing::debug;

use super::{FieldState, FormConfig, FormStateTrackers, ValidationMessage, Validator};
use crate::{
    Result, flatten::flatten_object_to_array, freeze::Frozen, nested::Nested, shadow::Shadow,
    tracker::MutationTracker,
};

/// Touched, dirty and error state of one form.
#[derive(Debug)]
pub struct FormState {
    trackers: FormStateTrackers,
    error_flat_list: Vec<ValidationMessage>,
    separator: char,
}

impl FormState {
    /// Builds the form state over the shape of `subject`.
    pub fn new<T: Nested>(subject: &T, config: &FormConfig) -> Result<Self> {
        Ok(Self {
            trackers: FormStateTrackers::new(subject, config)?,
            error_flat_list: Vec::new(),
            separator: config.separator,
        })
    }

    /// The underlying trackers.
    pub fn trackers(&self) -> &FormStateTrackers {
        &self.trackers
    }

    /// Messages from the last validation, in the order they were reported.
    pub fn error_flat_list(&self) -> &[ValidationMessage] {
        &self.error_flat_list
    }

    /// Snapshot of every field's error list.
    pub fn errors(&self) -> Frozen<Shadow<Vec<String>>> {
        self.trackers.errors().state()
    }

    /// Snapshot of every field's touched flag.
    pub fn touched(&self) -> Frozen<Shadow<bool>> {
        self.trackers.touched().state()
    }

    /// Snapshot of every field's dirty flag.
    pub fn dirty(&self) -> Frozen<Shadow<bool>> {
        self.trackers.dirty().state()
    }

    // Touched

    pub fn field_touched(&self, field: &str) -> Result<bool> {
        self.trackers
            .touched()
            .get_mutated_by_attribute_name(field)
            .copied()
    }

    pub fn set_field_touched(&mut self, value: bool, field: &str) -> Result<()> {
        self.trackers
            .touched_mut()
            .set_mutated_by_attribute_name(value, field)
    }

    pub fn set_fields_touched<I, S>(&mut self, value: bool, fields: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.trackers
            .touched_mut()
            .set_mutated_by_attribute_names(value, fields)
    }

    pub fn set_touched_all(&mut self, value: bool) {
        self.trackers.touched_mut().set_all(value);
    }

    // Dirty

    pub fn field_dirty(&self, field: &str) -> Result<bool> {
        self.trackers
            .dirty()
            .get_mutated_by_attribute_name(field)
            .copied()
    }

    pub fn set_field_dirty(&mut self, value: bool, field: &str) -> Result<()> {
        self.trackers
            .dirty_mut()
            .set_mutated_by_attribute_name(value, field)
    }

    pub fn set_fields_dirty<I, S>(&mut self, value: bool, fields: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.trackers
            .dirty_mut()
            .set_mutated_by_attribute_names(value, fields)
    }

    pub fn set_dirty_all(&mut self, value: bool) {
        self.trackers.dirty_mut().set_all(value);
    }

    // Errors

    /// Copy of the messages recorded for `field`.
    pub fn field_errors(&self, field: &str) -> Result<Vec<String>> {
        self.trackers
            .errors()
            .get_mutated_by_attribute_name(field)
            .cloned()
    }

    /// Returns `true` if `field` has no recorded messages.
    pub fn field_valid(&self, field: &str) -> Result<bool> {
        Ok(self
            .trackers
            .errors()
            .get_mutated_by_attribute_name(field)?
            .is_empty())
    }

    /// Replaces all error state with `errors`.
    ///
    /// The error tree is reset first, so fields missing from `errors` end up
    /// with no messages. Messages are grouped by key; each group keeps the
    /// reported order.
    ///
    /// # Errors
    /// Fails if a key is malformed or descends through another key's leaf
    /// (`"name"` and `"name.first"` in one batch). The fold is all or
    /// nothing: on error the error tree and the flat list keep their previous
    /// contents.
    pub fn set_errors_all(&mut self, errors: Vec<ValidationMessage>) -> Result<()> {
        debug!(count = errors.len(), "Replacing form errors");
        let mut next = self.trackers.errors().clone();
        next.reset();
        for (key, messages) in group_by_key(&errors) {
            next.set_mutated_by_attribute_name(messages, key)?;
        }
        *self.trackers.errors_mut() = next;
        self.error_flat_list = errors;
        Ok(())
    }

    /// Replaces error state for `fields` only.
    ///
    /// For validation runs that cover part of the form: every field in
    /// `fields` (and every key in `errors`) is rewritten, all other fields
    /// keep their messages. The flat list is rebuilt from the error tree in
    /// field order.
    ///
    /// # Errors
    /// Same as [`FormState::set_errors_all`], and equally all or nothing.
    pub fn set_errors_partial<I, S>(&mut self, fields: I, errors: Vec<ValidationMessage>) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut next = self.trackers.errors().clone();
        for field in fields {
            let field = field.as_ref();
            if !next.get_mutated_by_attribute_name(field)?.is_empty() {
                next.set_mutated_by_attribute_name(Vec::new(), field)?;
            }
        }
        let groups = group_by_key(&errors);
        debug!(
            count = errors.len(),
            fields = groups.len(),
            "Merging partial form errors"
        );
        for (key, messages) in groups {
            next.set_mutated_by_attribute_name(messages, key)?;
        }

        self.error_flat_list = collect_messages(&next, self.separator);
        *self.trackers.errors_mut() = next;
        Ok(())
    }

    /// Runs `validator` once over `subject` and folds its messages with
    /// [`FormState::set_errors_all`]. Returns [`FormState::is_form_valid`].
    pub fn validate_with<V: Validator + ?Sized>(
        &mut self,
        validator: &V,
        subject: &serde_json::Value,
    ) -> Result<bool> {
        let messages = validator.validate(subject);
        self.set_errors_all(messages)?;
        Ok(self.is_form_valid())
    }

    // Form-wide

    /// Returns `true` if any field is dirty.
    pub fn is_form_dirty(&self) -> bool {
        any_flag_set(&self.dirty(), self.separator)
    }

    /// Returns `true` if any field is touched.
    pub fn is_form_touched(&self) -> bool {
        any_flag_set(&self.touched(), self.separator)
    }

    /// Returns `true` if the last validation reported nothing.
    pub fn is_form_valid(&self) -> bool {
        self.error_flat_list.is_empty()
    }

    /// Collects the state of one field next to its current and previous
    /// values.
    pub fn field_state<T>(&self, name: &str, current_value: T, previous_value: T) -> Result<FieldState<T>> {
        let errors = self.field_errors(name)?;
        Ok(FieldState {
            name: name.to_string(),
            current_value,
            previous_value,
            touched: self.field_touched(name)?,
            dirty: self.field_dirty(name)?,
            is_valid: errors.is_empty(),
            errors,
        })
    }
}

fn group_by_key(errors: &[ValidationMessage]) -> IndexMap<&str, Vec<String>> {
    let mut groups: IndexMap<&str, Vec<String>> = IndexMap::new();
    for error in errors {
        groups
            .entry(error.key.as_str())
            .or_default()
            .push(error.message.clone());
    }
    groups
}

fn any_flag_set(tree: &Shadow<bool>, separator: char) -> bool {
    flatten_object_to_array(tree, separator)
        .iter()
        .any(|entry| entry.value.as_leaf().copied().unwrap_or(false))
}

fn collect_messages(tracker: &MutationTracker<Vec<String>>, separator: char) -> Vec<ValidationMessage> {
    tracker
        .leaves()
        .into_iter()
        .flat_map(|(path, messages)| {
            let key = path.encode(separator);
            messages
                .iter()
                .map(move |message| ValidationMessage::new(key.clone(), message.clone()))
        })
        .collect()
}
