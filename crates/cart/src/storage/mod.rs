//! Durable snapshot storage.
//!
//! Storage backends hold raw strings under keys. Encoding the cart is the
//! store's job, so a backend only needs to move text in and out of wherever it
//! keeps it. The two backends here are:
//!
//! - [`MemoryStorage`] - a `HashMap`, for tests and throwaway sessions
//! - [`FileStorage`] - one JSON file per key inside a data directory
//!
//! A database-backed implementation only has to implement [`SnapshotStorage`];
//! the reducer and the store do not change.

mod file;
mod memory;

use std::path::PathBuf;

use thiserror::Error;

pub use file::FileStorage;
pub use memory::MemoryStorage;
#[cfg(test)]
pub(crate) use memory::tests::FlakyStorage;

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("storage I/O error on {path}: {source}")]
    Io {
        /// File the operation touched.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Key cannot be used as a storage location.
    #[error("invalid storage key '{0}'")]
    InvalidKey(String),

    /// Backend is not reachable.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Key-value string storage for snapshots.
pub trait SnapshotStorage {
    /// Read the value stored under `key`, or `None` if nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `data` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn write(&mut self, key: &str, data: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing an absent key succeeds.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn delete(&mut self, key: &str) -> Result<(), StorageError>;
}

impl<S: SnapshotStorage + ?Sized> SnapshotStorage for &mut S {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).read(key)
    }

    fn write(&mut self, key: &str, data: &str) -> Result<(), StorageError> {
        (**self).write(key, data)
    }

    fn delete(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).delete(key)
    }
}

/// Whether `key` is usable by every backend (also as a file stem).
#[must_use]
pub fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
