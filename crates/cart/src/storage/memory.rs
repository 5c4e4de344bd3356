//! In-memory storage backend.

use std::collections::HashMap;

use super::{SnapshotStorage, StorageError};

/// Storage backed by a `HashMap`. Contents are lost when it is dropped.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    /// Create empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create storage pre-seeded with one value, e.g. a hand-written snapshot.
    #[must_use]
    pub fn with_entry(key: impl Into<String>, data: impl Into<String>) -> Self {
        let mut entries = HashMap::new();
        entries.insert(key.into(), data.into());
        Self { entries }
    }

    /// Raw value under `key`, for inspection.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl SnapshotStorage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, data: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_owned(), data.to_owned());
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod tests {
    use super::*;

    /// Memory storage that refuses deletes, or writes to one key, on demand.
    #[derive(Debug, Default)]
    pub struct FlakyStorage {
        pub inner: MemoryStorage,
        pub read_only_key: Option<String>,
        pub fail_deletes: bool,
    }

    impl FlakyStorage {
        pub fn failing_deletes() -> Self {
            Self {
                fail_deletes: true,
                ..Self::default()
            }
        }
    }

    impl SnapshotStorage for FlakyStorage {
        fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.inner.read(key)
        }

        fn write(&mut self, key: &str, data: &str) -> Result<(), StorageError> {
            if self.read_only_key.as_deref() == Some(key) {
                return Err(StorageError::Unavailable("writes disabled".to_string()));
            }
            self.inner.write(key, data)
        }

        fn delete(&mut self, key: &str) -> Result<(), StorageError> {
            if self.fail_deletes {
                return Err(StorageError::Unavailable("deletes disabled".to_string()));
            }
            self.inner.delete(key)
        }
    }

    #[test]
    fn test_starts_empty() {
        let storage = MemoryStorage::new();
        assert!(storage.read("cart").unwrap().is_none());
    }

    #[test]
    fn test_write_overwrites() {
        let mut storage = MemoryStorage::new();
        storage.write("cart", "first").unwrap();
        storage.write("cart", "second").unwrap();
        assert_eq!(storage.read("cart").unwrap().as_deref(), Some("second"));
    }

    #[test]
    fn test_delete_absent_key() {
        let mut storage = MemoryStorage::with_entry("cart", "{}");
        storage.delete("orders").unwrap();
        storage.delete("cart").unwrap();
        assert!(storage.get("cart").is_none());
    }
}
