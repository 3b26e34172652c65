//! In-memory storage implementation.
//!
//! This provides a simple in-memory implementation of [`ListStorage`]
//! for use in unit tests and sessions that should not touch the disk.

use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};

use super::{ListStorage, StorageResult};

/// In-memory list storage.
///
/// Records live in a `BTreeMap`, so keys come back sorted.
/// It's thread-safe via `RwLock` but data is lost when dropped.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    records: RwLock<BTreeMap<String, String>>,
}

impl MemoryStorage {
    /// Create a new empty in-memory storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether no records are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ListStorage for MemoryStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let records = self.records.read().unwrap_or_else(PoisonError::into_inner);
        Ok(records.get(key).cloned())
    }

    fn put(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut records = self.records.write().unwrap_or_else(PoisonError::into_inner);
        records.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn list_keys(&self) -> StorageResult<Vec<String>> {
        let records = self.records.read().unwrap_or_else(PoisonError::into_inner);
        Ok(records.keys().cloned().collect())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        let mut records = self.records.write().unwrap_or_else(PoisonError::into_inner);
        records.remove(key);
        Ok(())
    }
}
