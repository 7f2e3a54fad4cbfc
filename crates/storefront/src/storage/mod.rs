//! Durable key/value storage for store snapshots.
//!
//! A store persists its whole collection as one JSON document under a fixed
//! key (see [`keys`]). Storage is best-effort from the stores' point of view:
//! [`load_snapshot`] and [`save_snapshot`] log failures and carry on, so a
//! broken disk never turns a cart click into an error.
//!
//! # Backends
//!
//! - [`MemoryStorage`] - process-local, for tests and ephemeral sessions
//! - [`FileStorage`] - one JSON file per key under a data directory

mod file;
mod memory;

use std::collections::HashSet;

use deskfront_core::ProductId;
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Fixed storage keys.
pub mod keys {
    /// Persisted wishlist collection.
    pub const WISHLIST: &str = "wishlist";
    /// Persisted cart collection (persistent-cart variant only).
    pub const CART: &str = "cart";
}

/// Errors raised by storage backends.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The key contains characters outside `[A-Za-z0-9_-]` or is empty.
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),

    /// Underlying I/O failed.
    #[error("storage I/O error for key {key:?}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// Another owner already holds the storage directory.
    #[error("data directory {} is in use by another process", .dir.display())]
    Locked { dir: std::path::PathBuf },

    /// The backend's internal lock was poisoned by a panicking writer.
    #[error("storage backend unavailable")]
    Poisoned,
}

/// A string-valued key/value store.
pub trait KeyValueStorage: Send + Sync {
    /// Read the raw value for `key`, or `None` if it was never written.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is invalid or the backend cannot be read.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value for `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is invalid or the backend cannot be written.
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Check that a key is non-empty and made of `[A-Za-z0-9_-]`.
///
/// # Errors
///
/// Returns [`StorageError::InvalidKey`] otherwise.
pub fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && key
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_');

    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_owned()))
    }
}

/// Load a collection previously written with [`save_snapshot`].
///
/// Missing, unreadable, or malformed data yields an empty collection.
pub fn load_snapshot<T: DeserializeOwned>(storage: &dyn KeyValueStorage, key: &str) -> Vec<T> {
    let raw = match storage.read(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            tracing::warn!(key, error = %e, "Failed to read stored snapshot, starting empty");
            return Vec::new();
        }
    };

    match serde_json::from_str::<Vec<T>>(&raw) {
        Ok(items) => items,
        Err(e) => {
            tracing::warn!(key, error = %e, "Discarding malformed stored snapshot");
            Vec::new()
        }
    }
}

/// Serialize a collection as a JSON array and write it under `key`.
pub fn save_snapshot<T: Serialize>(storage: &dyn KeyValueStorage, key: &str, items: &[T]) {
    let raw = match serde_json::to_string(items) {
        Ok(raw) => raw,
        Err(e) => {
            tracing::warn!(key, error = %e, "Failed to serialize snapshot");
            return;
        }
    };

    if let Err(e) = storage.write(key, &raw) {
        tracing::warn!(key, error = %e, "Failed to persist snapshot");
    }
}

/// Keep the first occurrence of every id, preserving order.
pub(crate) fn dedupe_by_id<T>(items: Vec<T>, id: impl Fn(&T) -> &ProductId) -> Vec<T> {
    let mut seen = HashSet::new();
    let before = items.len();
    let kept: Vec<T> = items
        .into_iter()
        .filter(|item| seen.insert(id(item).clone()))
        .collect();

    if kept.len() != before {
        tracing::warn!(dropped = before - kept.len(), "Dropped duplicate stored entries");
    }
    kept
}
