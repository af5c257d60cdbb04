//! Todo list with filtering, an edit lifecycle and key-value persistence.
//!
//! - [`TodoListStore`]: the authoritative ordered list, its filters and counts
//! - [`TodoPersistence`]: saves/loads the list under one storage key
//! - [`TodoReducer`]: turns [`TodoAction`]s into list changes and save effects
//! - [`FileStorage`]: a `localStorage`-like file backend
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use todomvc::{FileStorage, TodoAction, TodoEnvironment, TodoPersistence, TodoReducer, TodoState};
//! use todomvc_runtime::Store;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let persistence = TodoPersistence::new(Arc::new(FileStorage::new("todos.json")));
//! let state = TodoState::from_items(persistence.load()?);
//! let store = Store::new(state, TodoReducer::new(), TodoEnvironment::new(persistence));
//!
//! store.send(TodoAction::Create { label: "Buy milk".to_string() }).await?;
//!
//! let summary = store.state(|s| s.todos.summary()).await;
//! println!("{}", summary.items_left());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod list;
pub mod persistence;
pub mod reducer;
pub mod storage;
pub mod types;

// Re-export commonly used types
pub use config::{ConfigError, TodoConfig};
pub use error::{Result, TodoError};
pub use list::TodoListStore;
pub use persistence::{DEFAULT_STORAGE_KEY, TodoPersistence};
pub use reducer::{TodoEnvironment, TodoReducer};
pub use storage::FileStorage;
pub use types::{Filter, Summary, TodoAction, TodoItem, TodoState};
