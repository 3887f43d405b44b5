//! Durable local storage for the cart and checkout draft.
//!
//! Two independent records, each read once at startup and rewritten on
//! every relevant mutation. Absence or corruption of a record means
//! "start empty" and is never fatal; write failures are the caller's
//! business to log and swallow (in-memory state stays authoritative
//! for the session).
//!
//! No cross-instance coordination is provided: concurrent writers race
//! last-write-wins, an accepted limitation of the storage model.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Storage key for the serialized cart.
pub const CART_KEY: &str = "cart";

/// Storage key for the serialized checkout form draft.
pub const DRAFT_KEY: &str = "checkout-draft";

/// Errors from the durable store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying I/O failure (quota, permissions, missing directory).
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A stored record could not be parsed.
    #[error("storage parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Key-value durable store, the local-storage analog.
pub trait LocalStore {
    /// Read the raw record under `key`, `None` when absent.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] on read failure.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write the raw record under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] on write failure.
    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove the record under `key`; absent keys are a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] on removal failure.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;

    /// Read and deserialize the record under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Parse`] for corrupt records; callers
    /// treat that as "start empty" after logging.
    fn read_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        match self.read(key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Serialize and write `value` under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] on serialization or write failure.
    fn write_json<T: Serialize>(&mut self, key: &str, value: &T) -> Result<(), StorageError> {
        let raw = serde_json::to_string(value)?;
        self.write(key, &raw)
    }
}

/// File-backed store: one `<key>.json` file per record in a dedicated
/// directory.
#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open (creating if needed) a store rooted at `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    /// The directory this store writes into.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl LocalStore for FileStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::write(self.path_for(key), value)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory store for tests, with optional write-failure injection.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    /// When set, every write and removal fails as if the quota were
    /// exhausted.
    pub fail_writes: bool,
}

impl MemoryStore {
    /// An empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn quota_error() -> StorageError {
        StorageError::Io(std::io::Error::other("simulated quota exceeded"))
    }
}

impl LocalStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_writes {
            return Err(Self::quota_error());
        }
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        if self.fail_writes {
            return Err(Self::quota_error());
        }
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::cart::Cart;

    fn temp_store() -> FileStore {
        let dir = std::env::temp_dir().join(format!("morelufs-test-{}", uuid::Uuid::new_v4()));
        FileStore::open(dir).unwrap()
    }

    #[test]
    fn test_file_store_roundtrip() {
        let mut store = temp_store();
        assert!(store.read(CART_KEY).unwrap().is_none());

        store.write(CART_KEY, "{\"items\":[]}").unwrap();
        assert_eq!(store.read(CART_KEY).unwrap().unwrap(), "{\"items\":[]}");

        store.remove(CART_KEY).unwrap();
        assert!(store.read(CART_KEY).unwrap().is_none());

        fs::remove_dir_all(store.dir()).unwrap();
    }

    #[test]
    fn test_file_store_remove_absent_is_noop() {
        let mut store = temp_store();
        store.remove("never-written").unwrap();
        fs::remove_dir_all(store.dir()).unwrap();
    }

    #[test]
    fn test_json_helpers() {
        let mut store = MemoryStore::new();
        let cart = Cart::new();
        store.write_json(CART_KEY, &cart).unwrap();

        let restored: Cart = store.read_json(CART_KEY).unwrap().unwrap();
        assert_eq!(restored, cart);
    }

    #[test]
    fn test_corrupt_record_is_a_parse_error() {
        let mut store = MemoryStore::new();
        store.write(CART_KEY, "not json at all").unwrap();
        let result: Result<Option<Cart>, _> = store.read_json(CART_KEY);
        assert!(matches!(result, Err(StorageError::Parse(_))));
    }

    #[test]
    fn test_memory_store_write_failure_injection() {
        let mut store = MemoryStore::new();
        store.fail_writes = true;
        assert!(store.write(CART_KEY, "{}").is_err());
        assert!(store.read(CART_KEY).unwrap().is_none());
    }
}
