//! Form configuration.
//!
//! ```
//! use formstate::form::FormConfig;
//!
//! let config = FormConfig::from_json_str(r#"{"initiallyTouched": ["name"]}"#)?;
//! assert_eq!(config.initially_touched, vec!["name".to_string()]);
//! assert_eq!(config.separator, '.');
//! # Ok::<(), formstate::Error>(())
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::FormError;
use crate::{Result, path::DEFAULT_SEPARATOR};

fn default_separator() -> char {
    DEFAULT_SEPARATOR
}

/// Settings for building a [`crate::form::FormState`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FormConfig {
    /// Fields that start out touched.
    #[serde(default, alias = "initiallyTouched")]
    pub initially_touched: Vec<String>,

    /// Fields that start out dirty.
    #[serde(default, alias = "initiallyDirty")]
    pub initially_dirty: Vec<String>,

    /// Path separator for every field name.
    #[serde(default = "default_separator")]
    pub separator: char,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            initially_touched: Vec::new(),
            initially_dirty: Vec::new(),
            separator: DEFAULT_SEPARATOR,
        }
    }
}

impl FormConfig {
    /// Marks `fields` as initially touched.
    pub fn with_initially_touched<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.initially_touched = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Marks `fields` as initially dirty.
    pub fn with_initially_dirty<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.initially_dirty = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Uses `separator` for field names.
    pub fn with_separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    /// Checks that the configuration can be used.
    ///
    /// Digits and whitespace are rejected as separators: digits would be
    /// confused with list indices.
    pub fn validate(&self) -> Result<()> {
        if self.separator.is_ascii_digit() || self.separator.is_whitespace() {
            return Err(FormError::InvalidConfig {
                reason: format!("separator {:?} is not allowed", self.separator),
            }
            .into());
        }
        Ok(())
    }

    /// Parses and validates a JSON configuration.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: FormConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| FormError::ConfigLoad {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let config: FormConfig =
            serde_json::from_str(&contents).map_err(|e| FormError::ConfigLoad {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
        config.validate()?;
        tracing::debug!(path = %path.display(), "Loaded form configuration");
        Ok(config)
    }
}
