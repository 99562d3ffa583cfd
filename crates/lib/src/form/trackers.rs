//! The three trackers behind a form.

use crate::{
    Result,
    nested::Nested,
    tracker::{MutationTracker, TrackerOptions},
};

use super::FormConfig;

/// Touched, dirty and error trackers built over one subject shape.
///
/// The trackers are independent: each has its own shadow tree and defaults
/// (`false`, `false`, no messages).
#[derive(Debug)]
pub struct FormStateTrackers {
    touched: MutationTracker<bool>,
    dirty: MutationTracker<bool>,
    errors: MutationTracker<Vec<String>>,
}

impl FormStateTrackers {
    /// Builds all three trackers over `subject`.
    ///
    /// `config.initially_touched` and `config.initially_dirty` seed the first
    /// two with `true`.
    pub fn new<T: Nested>(subject: &T, config: &FormConfig) -> Result<Self> {
        config.validate()?;
        let flag = |seed: &[String]| {
            TrackerOptions::new(false)
                .with_initial_mutation(seed.iter().cloned(), true)
                .with_separator(config.separator)
        };

        Ok(Self {
            touched: MutationTracker::new(subject, flag(&config.initially_touched)),
            dirty: MutationTracker::new(subject, flag(&config.initially_dirty)),
            errors: MutationTracker::new(
                subject,
                TrackerOptions::new(Vec::new()).with_separator(config.separator),
            ),
        })
    }

    pub fn touched(&self) -> &MutationTracker<bool> {
        &self.touched
    }

    pub fn touched_mut(&mut self) -> &mut MutationTracker<bool> {
        &mut self.touched
    }

    pub fn dirty(&self) -> &MutationTracker<bool> {
        &self.dirty
    }

    pub fn dirty_mut(&mut self) -> &mut MutationTracker<bool> {
        &mut self.dirty
    }

    pub fn errors(&self) -> &MutationTracker<Vec<String>> {
        &self.errors
    }

    pub fn errors_mut(&mut self) -> &mut MutationTracker<Vec<String>> {
        &mut self.errors
    }
}
