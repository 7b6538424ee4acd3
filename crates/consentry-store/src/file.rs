//! JSON-file-backed storage, one file per origin directory.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use consentry_core::{Error, Result};

use crate::storage::StorageBackend;

const STORE_FILE: &str = "consent-store.json";

/// On-disk shape of the store file.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreFile {
    #[serde(default)]
    entries: HashMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    saved_at: Option<String>,
}

/// Durable backend persisting entries to `<dir>/consent-store.json`.
///
/// Each site origin gets its own directory, which gives the same scoping
/// as browser local storage. Reads are served from memory; every mutation
/// rewrites the file.
pub struct FileStorage {
    path: PathBuf,
    entries: RwLock<HashMap<String, String>>,
}

impl FileStorage {
    /// Open or create the store under `dir`. Creates the directory if
    /// needed. A missing or unreadable store file starts the store empty.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir).map_err(|e| Error::Storage(e.to_string()))?;
        let path = dir.join(STORE_FILE);

        let entries = match std::fs::read_to_string(&path) {
            Ok(data) => match serde_json::from_str::<StoreFile>(&data) {
                Ok(file) => file.entries,
                Err(e) => {
                    warn!("Store file {} unreadable, starting empty: {}", path.display(), e);
                    HashMap::new()
                }
            },
            Err(_) => HashMap::new(),
        };

        info!(
            "FileStorage opened: {} entries, path={}",
            entries.len(),
            path.display()
        );

        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<()> {
        let file = StoreFile {
            entries: self.entries.read().clone(),
            saved_at: Some(chrono::Utc::now().to_rfc3339()),
        };
        let json = serde_json::to_string_pretty(&file)?;
        std::fs::write(&self.path, json).map_err(|e| Error::Storage(e.to_string()))?;
        Ok(())
    }
}

impl StorageBackend for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .write()
            .insert(key.to_string(), value.to_string());
        self.persist()
    }

    fn remove(&self, key: &str) -> Result<()> {
        let removed = self.entries.write().remove(key).is_some();
        if removed {
            self.persist()?;
        }
        Ok(())
    }
}
