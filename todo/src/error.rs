//! Error types for the todo domain.

use thiserror::Error;
use todomvc_core::environment::StorageError;

/// Errors raised by todo list operations and persistence
#[derive(Error, Debug)]
pub enum TodoError {
    /// A label was empty or whitespace-only
    #[error("Todo label cannot be empty")]
    EmptyLabel,

    /// An index did not address an item in the list
    #[error("No todo at index {index} (list has {len} items)")]
    IndexOutOfRange {
        /// Requested index
        index: usize,
        /// List length at the time of the request
        len: usize,
    },

    /// A label change was requested for an item not in editing mode
    #[error("Todo at index {index} is not being edited")]
    NotEditing {
        /// Index of the item
        index: usize,
    },

    /// The stored value is not a JSON array of `{label, completed}` objects
    #[error("Stored todos are malformed: {0}")]
    Parse(#[from] serde_json::Error),

    /// The storage backend failed
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Result alias for todo operations
pub type Result<T, E = TodoError> = std::result::Result<T, E>;
