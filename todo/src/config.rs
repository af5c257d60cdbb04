//! Environment-based configuration.
//!
//! | Variable           | Default            | Meaning                          |
//! |--------------------|--------------------|----------------------------------|
//! | `TODO_STORAGE_KEY` | `todos-composable` | Key the list is stored under     |
//! | `TODO_DATA_FILE`   | `todos.json`       | File backing the key-value store |
//! | `TODO_LOG`         | `info`             | Default log filter               |
//!
//! `RUST_LOG`, when set, takes precedence over `TODO_LOG`.

use crate::persistence::DEFAULT_STORAGE_KEY;
use std::path::PathBuf;
use thiserror::Error;

/// Configuration error
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable was set to an unusable value
    #[error("Invalid value for {var}: {value:?}")]
    InvalidValue {
        /// Variable name
        var: &'static str,
        /// Offending value
        value: String,
    },
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoConfig {
    /// Key the list is stored under
    pub storage_key: String,
    /// File backing the key-value store
    pub data_file: PathBuf,
    /// Default `tracing` filter directive
    pub log_filter: String,
}

impl Default for TodoConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            data_file: PathBuf::from("todos.json"),
            log_filter: "info".to_string(),
        }
    }
}

impl TodoConfig {
    /// Variable holding the storage key
    pub const STORAGE_KEY_VAR: &'static str = "TODO_STORAGE_KEY";
    /// Variable holding the data file path
    pub const DATA_FILE_VAR: &'static str = "TODO_DATA_FILE";
    /// Variable holding the default log filter
    pub const LOG_VAR: &'static str = "TODO_LOG";

    /// Load configuration from process environment variables
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    ///
    /// Unset variables fall back to [`TodoConfig::default`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a variable is set to an invalid value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(key) = lookup(Self::STORAGE_KEY_VAR) {
            config.storage_key = key;
        }
        if let Some(path) = lookup(Self::DATA_FILE_VAR) {
            config.data_file = PathBuf::from(path);
        }
        if let Some(filter) = lookup(Self::LOG_VAR) {
            config.log_filter = filter;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for an empty or padded storage
    /// key, an empty data file path, or an empty log filter.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage_key.trim().is_empty() || self.storage_key.trim() != self.storage_key {
            return Err(ConfigError::InvalidValue {
                var: Self::STORAGE_KEY_VAR,
                value: self.storage_key.clone(),
            });
        }

        if self.data_file.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                var: Self::DATA_FILE_VAR,
                value: String::new(),
            });
        }

        if self.log_filter.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                var: Self::LOG_VAR,
                value: self.log_filter.clone(),
            });
        }

        Ok(())
    }
}
