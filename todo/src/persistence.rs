//! Load/save boundary between the todo list and key-value storage.
//!
//! The list is stored under a single key as a JSON array whose elements have
//! exactly two fields:
//!
//! ```json
//! [{"label":"Taste JavaScript","completed":true},{"label":"Buy a unicorn","completed":false}]
//! ```
//!
//! Transient fields such as `editing` are never written.

use crate::error::Result;
use crate::types::TodoItem;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use todomvc_core::environment::Storage;

/// Storage key used when none is configured
pub const DEFAULT_STORAGE_KEY: &str = "todos-composable";

/// Persisted shape of a todo item
#[derive(Serialize, Deserialize)]
struct StoredTodo {
    label: String,
    completed: bool,
}

impl From<&TodoItem> for StoredTodo {
    fn from(item: &TodoItem) -> Self {
        Self {
            label: item.label.clone(),
            completed: item.completed,
        }
    }
}

impl From<StoredTodo> for TodoItem {
    fn from(stored: StoredTodo) -> Self {
        Self::new(stored.label, stored.completed)
    }
}

/// Reads and writes the todo list under one well-known storage key
#[derive(Clone)]
pub struct TodoPersistence {
    storage: Arc<dyn Storage>,
    key: String,
}

impl TodoPersistence {
    /// Creates a persistence using [`DEFAULT_STORAGE_KEY`]
    #[must_use]
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self::with_key(storage, DEFAULT_STORAGE_KEY)
    }

    /// Creates a persistence using a custom key
    #[must_use]
    pub fn with_key(storage: Arc<dyn Storage>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    /// The storage key
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Loads the stored list
    ///
    /// An absent key or empty value is an empty list.
    ///
    /// # Errors
    ///
    /// - [`TodoError::Parse`](crate::TodoError::Parse) if the value is not a
    ///   JSON array of `{label, completed}` objects
    /// - [`TodoError::Storage`](crate::TodoError::Storage) if the backend fails
    pub fn load(&self) -> Result<Vec<TodoItem>> {
        let Some(raw) = self.storage.get_item(&self.key)? else {
            tracing::debug!(key = %self.key, "No stored todos");
            return Ok(Vec::new());
        };
        if raw.is_empty() {
            return Ok(Vec::new());
        }

        let stored: Vec<StoredTodo> = serde_json::from_str(&raw)?;
        tracing::debug!(key = %self.key, count = stored.len(), "Loaded todos");
        Ok(stored.into_iter().map(TodoItem::from).collect())
    }

    /// Writes `items`, keeping only `label` and `completed`
    ///
    /// # Errors
    ///
    /// Returns [`TodoError::Storage`](crate::TodoError::Storage) if the backend fails.
    pub fn save(&self, items: &[TodoItem]) -> Result<()> {
        let stored: Vec<StoredTodo> = items.iter().map(StoredTodo::from).collect();
        let raw = serde_json::to_string(&stored)?;
        self.storage.set_item(&self.key, &raw)?;
        tracing::debug!(key = %self.key, count = items.len(), "Saved todos");
        Ok(())
    }

    /// Removes the stored list
    ///
    /// # Errors
    ///
    /// Returns [`TodoError::Storage`](crate::TodoError::Storage) if the backend fails.
    pub fn clear(&self) -> Result<()> {
        self.storage.remove_item(&self.key)?;
        Ok(())
    }
}

impl fmt::Debug for TodoPersistence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TodoPersistence")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}
