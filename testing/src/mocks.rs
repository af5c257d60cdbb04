//! Mock implementations of environment traits
//!
//! - [`InMemoryStorage`]: `HashMap`-backed key-value storage
//! - [`FailingStorage`]: storage whose every call fails

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use todomvc_core::environment::{Storage, StorageError};

/// In-memory key-value storage for fast, deterministic testing.
///
/// Clones share the same underlying map, so a test can hand one clone to the
/// code under test and inspect the other.
///
/// # Example
///
/// ```
/// use todomvc_core::environment::Storage;
/// use todomvc_testing::mocks::InMemoryStorage;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let storage = InMemoryStorage::new();
/// storage.set_item("todos", "[]")?;
/// assert_eq!(storage.get_item("todos")?.as_deref(), Some("[]"));
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default)]
pub struct InMemoryStorage {
    data: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryStorage {
    /// Create a new empty in-memory storage
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a storage pre-seeded with a single key
    #[must_use]
    pub fn with_item(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut data = HashMap::new();
        data.insert(key.into(), value.into());
        Self {
            data: Arc::new(RwLock::new(data)),
        }
    }

    /// Raw value under `key`, bypassing the [`Storage`] trait
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<String> {
        self.data
            .read()
            .ok()
            .and_then(|data| data.get(key).cloned())
    }

    /// Number of stored keys
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.read().map_or(0, |data| data.len())
    }

    /// Check if the storage is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned() -> StorageError {
    StorageError::Unavailable("in-memory storage lock poisoned".to_string())
}

impl Storage for InMemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let data = self.data.read().map_err(|_| poisoned())?;
        Ok(data.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut data = self.data.write().map_err(|_| poisoned())?;
        data.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let mut data = self.data.write().map_err(|_| poisoned())?;
        data.remove(key);
        Ok(())
    }
}

/// Storage that rejects every operation with [`StorageError::Unavailable`].
#[derive(Clone, Debug, Default)]
pub struct FailingStorage;

impl FailingStorage {
    const REASON: &'static str = "storage disabled for test";
}

impl Storage for FailingStorage {
    fn get_item(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable(Self::REASON.to_string()))
    }

    fn set_item(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable(Self::REASON.to_string()))
    }

    fn remove_item(&self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable(Self::REASON.to_string()))
    }
}
