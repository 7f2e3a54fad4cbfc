//! In-memory storage backend.

use std::collections::HashMap;
use std::sync::RwLock;

use super::{KeyValueStorage, StorageError, validate_key};

/// Process-local storage. Values are lost when the value is dropped.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        validate_key(key)?;
        let values = self.values.read().map_err(|_| StorageError::Poisoned)?;
        Ok(values.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        let mut values = self.values.write().map_err(|_| StorageError::Poisoned)?;
        values.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_read_after_write() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.read("wishlist").unwrap(), None);

        storage.write("wishlist", "[]").unwrap();
        assert_eq!(storage.read("wishlist").unwrap().as_deref(), Some("[]"));

        storage.write("wishlist", "[1]").unwrap();
        assert_eq!(storage.read("wishlist").unwrap().as_deref(), Some("[1]"));
    }

    #[test]
    fn test_rejects_invalid_key() {
        let storage = MemoryStorage::new();
        assert!(matches!(
            storage.write("no/slashes", "x"),
            Err(StorageError::InvalidKey(_))
        ));
    }
}
