//! Local key-value storage
//!
//! Provides:
//! - The `KeyValueStore` seam: string keys mapped to JSON string values
//! - An in-memory implementation for tests and throwaway sessions
//! - A directory-of-JSON-files implementation used by the terminal front end
//! - `ProfileStore`, the typed layer that reads and writes learner records

pub mod file;
pub mod profile;

use anyhow::Result;
use std::collections::HashMap;
use std::sync::RwLock;

pub use file::JsonFileStore;
pub use profile::{ProfileStore, RecordState, PROFILE_KEY, USER_KEY};

/// String-keyed storage of JSON documents
#[cfg_attr(test, mockall::automock)]
pub trait KeyValueStore: Send + Sync {
    /// Fetch the raw value for a key, `None` when the key was never written
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Overwrite the value for a key
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete a key. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}

/// Volatile store backed by a hash map
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self
            .entries
            .read()
            .map_err(|_| anyhow::anyhow!("memory store lock poisoned"))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| anyhow::anyhow!("memory store lock poisoned"))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| anyhow::anyhow!("memory store lock poisoned"))?;
        entries.remove(key);
        Ok(())
    }
}
