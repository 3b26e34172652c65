//! File-backed storage implementation.
//!
//! Each record is stored as `<key>.json` inside a single directory.

use std::io::{Error, ErrorKind};
use std::path::{Path, PathBuf};

use super::{ListStorage, StorageResult};
use crate::error::GroceryError;
use crate::fs::FileSystem;

const RECORD_EXTENSION: &str = "json";

/// List storage keeping one JSON file per record.
#[derive(Debug, Clone)]
pub struct FileStorage<FS: FileSystem> {
    fs: FS,
    dir: PathBuf,
}

impl<FS: FileSystem> FileStorage<FS> {
    /// Create a storage rooted at `dir`. The directory is created on first write.
    pub fn new(fs: FS, dir: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            dir: dir.into(),
        }
    }

    /// Directory holding the records.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn record_path(&self, key: &str) -> std::io::Result<PathBuf> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && !key.contains(['/', '\\'])
            && key != "..";
        if !valid {
            return Err(Error::new(
                ErrorKind::InvalidInput,
                format!("Invalid storage key: {:?}", key),
            ));
        }

        Ok(self.dir.join(format!("{}.{}", key, RECORD_EXTENSION)))
    }
}

impl<FS: FileSystem> ListStorage for FileStorage<FS> {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let read_err = |source| GroceryError::StorageRead {
            key: key.to_string(),
            source,
        };

        let path = self.record_path(key).map_err(read_err)?;
        if !self.fs.exists(&path) {
            return Ok(None);
        }

        match self.fs.read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(read_err(e)),
        }
    }

    fn put(&self, key: &str, value: &str) -> StorageResult<()> {
        let write_err = |source| GroceryError::StorageWrite {
            key: key.to_string(),
            source,
        };

        let path = self.record_path(key).map_err(write_err)?;
        self.fs.create_dir_all(&self.dir).map_err(write_err)?;
        self.fs.write_file(&path, value).map_err(write_err)
    }

    fn list_keys(&self) -> StorageResult<Vec<String>> {
        let mut keys: Vec<String> = self
            .fs
            .list_files(&self.dir)?
            .into_iter()
            .filter(|p| p.extension().is_some_and(|ext| ext == RECORD_EXTENSION))
            .filter_map(|p| p.file_stem().map(|s| s.to_string_lossy().into_owned()))
            .collect();
        keys.sort();
        Ok(keys)
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        let write_err = |source| GroceryError::StorageWrite {
            key: key.to_string(),
            source,
        };

        let path = self.record_path(key).map_err(write_err)?;
        match self.fs.delete_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(write_err(e)),
        }
    }
}
