//! Storage
//!
//! The cart and wishlist stores persist their full state as JSON blobs
//! under fixed keys. This module defines the port they write through, an
//! in-memory implementation for tests, and a directory-backed
//! implementation that keeps one file per key on the local machine.

use std::{fs, io, path::PathBuf};

use rustc_hash::FxHashMap;
use thiserror::Error;

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying IO failure while reading or writing a blob.
    #[error("failed to access persisted state: {0}")]
    Io(#[from] io::Error),
}

/// Port for persisting store snapshots as key/value blobs.
///
/// Implementations hold the full serialized snapshot per key; there are no
/// partial writes. A missing key is not an error.
pub trait Storage {
    /// Load the blob stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend could not be read.
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Persist `value` under `key`, replacing any previous blob.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend could not be written.
    fn save(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-memory storage, used as the fake in tests and demos.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    blobs: FxHashMap<String, String>,
}

impl MemoryStorage {
    /// Create an empty in-memory storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a storage pre-seeded with a blob, for rehydration tests.
    #[must_use]
    pub fn with_blob(key: &str, value: &str) -> Self {
        let mut storage = Self::new();

        storage.blobs.insert(key.to_string(), value.to_string());

        storage
    }

    /// Inspect the raw blob stored under `key`.
    #[must_use]
    pub fn blob(&self, key: &str) -> Option<&str> {
        self.blobs.get(key).map(String::as_str)
    }
}

impl Storage for MemoryStorage {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.blobs.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.blobs.insert(key.to_string(), value.to_string());

        Ok(())
    }
}

/// Directory-backed storage: one `<key>.json` file per key.
#[derive(Debug, Clone)]
pub struct DirStorage {
    base_path: PathBuf,
}

impl DirStorage {
    /// Create a storage rooted at the given directory.
    ///
    /// The directory is created lazily on the first write.
    #[must_use]
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    fn blob_path(&self, key: &str) -> PathBuf {
        self.base_path.join(format!("{key}.json"))
    }
}

impl Storage for DirStorage {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.blob_path(key)) {
            Ok(value) => Ok(Some(value)),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(error.into()),
        }
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.base_path)?;
        fs::write(self.blob_path(key), value)?;

        Ok(())
    }
}
