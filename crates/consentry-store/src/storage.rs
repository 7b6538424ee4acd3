//! Storage backend trait and the in-memory implementation.
//!
//! The `StorageBackend` trait abstracts over the origin-scoped key-value
//! store the consent record lives in. Implementations:
//! - `MemoryStorage`: process-local map, nothing survives the process
//! - `FileStorage`: JSON file per origin directory (see `file.rs`)

use std::collections::HashMap;

use parking_lot::RwLock;

use consentry_core::Result;

/// Trait for durable string key-value storage backends.
///
/// Reads and writes are synchronous; a single get or set is atomic with
/// respect to other calls on the same backend. The consent controller only
/// ever reads and overwrites its one key; `remove` exists for hosts and
/// test harnesses that reset state.
pub trait StorageBackend: Send + Sync {
    /// Read the value stored under `key`. Returns None if absent.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, overwriting any previous value.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key` from storage.
    fn remove(&self, key: &str) -> Result<()>;
}

/// In-memory backend. Never fails; contents die with the process.
#[derive(Default)]
pub struct MemoryStorage {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl StorageBackend for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .write()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries.write().remove(key);
        Ok(())
    }
}
