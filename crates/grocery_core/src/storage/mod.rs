//! Keyed persistence of list snapshots.
//!
//! This module defines the [`ListStorage`] trait, a minimal key-value store
//! holding one JSON record per list, keyed by the list id. Any backend with
//! these four operations suffices: [`MemoryStorage`] for tests and
//! ephemeral sessions, [`FileStorage`] for one file per record on disk.
//!
//! Backends are synchronous. A networked backend must still block until an
//! operation has completed, because the merge engine relies on an existence
//! check finishing before it reads and writes.

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use crate::error::GroceryError;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, GroceryError>;

/// Trait for list snapshot storage backends.
pub trait ListStorage: Send + Sync {
    /// Load a record. Returns `None` if the key doesn't exist.
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Save a record, overwriting any existing value.
    fn put(&self, key: &str, value: &str) -> StorageResult<()>;

    /// All keys currently stored, in ascending order.
    fn list_keys(&self) -> StorageResult<Vec<String>>;

    /// Delete a record. Deleting a missing key is not an error.
    fn remove(&self, key: &str) -> StorageResult<()>;

    /// Check whether a record exists.
    fn contains(&self, key: &str) -> StorageResult<bool> {
        Ok(self.get(key)?.is_some())
    }
}

// Blanket implementation for references to ListStorage
impl<T: ListStorage + ?Sized> ListStorage for &T {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get(key)
    }

    fn put(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).put(key, value)
    }

    fn list_keys(&self) -> StorageResult<Vec<String>> {
        (**self).list_keys()
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        (**self).remove(key)
    }

    fn contains(&self, key: &str) -> StorageResult<bool> {
        (**self).contains(key)
    }
}

impl<T: ListStorage + ?Sized> ListStorage for Box<T> {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get(key)
    }

    fn put(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).put(key, value)
    }

    fn list_keys(&self) -> StorageResult<Vec<String>> {
        (**self).list_keys()
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        (**self).remove(key)
    }

    fn contains(&self, key: &str) -> StorageResult<bool> {
        (**self).contains(key)
    }
}
