//! # Key-Value Store
//!
//! The persistence adapter the navigators and settings remember choices in.
//! One string per key, no cross-key transactions.
//!
//! `FileStore` keeps everything in a single JSON object at
//! `~/.zico/storage.json`. Writes go through `.tmp` + `rename()` so a crash
//! mid-write leaves the previous file intact.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use log::{debug, warn};
use tokio::sync::Mutex;

#[derive(Debug)]
pub enum StoreError {
    Io(io::Error),
    /// The backing file exists but is not a JSON string map.
    Corrupt(serde_json::Error),
    /// No usable location for the store (e.g. no home directory).
    Unavailable(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "storage I/O error: {e}"),
            StoreError::Corrupt(e) => write!(f, "storage file is corrupt: {e}"),
            StoreError::Unavailable(msg) => write!(f, "storage unavailable: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<io::Error> for StoreError {
    fn from(e: io::Error) -> Self {
        StoreError::Io(e)
    }
}

#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns the name of the store (for logs).
    fn name(&self) -> &str;

    /// Last saved value for `key`, or `None` if nothing was saved.
    async fn load(&self, key: &str) -> Result<Option<String>, StoreError>;

    async fn save(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Forget every key.
    async fn clear(&self) -> Result<(), StoreError>;
}

/// Load a key, treating any storage failure as "no saved value".
pub async fn load_or_none(store: &dyn KeyValueStore, key: &str) -> Option<String> {
    match store.load(key).await {
        Ok(value) => value,
        Err(e) => {
            warn!("Failed to load '{}' from {}: {}", key, store.name(), e);
            None
        }
    }
}

pub fn encode_bool(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

/// Only the literal strings `"true"` and `"false"` are booleans.
pub fn decode_bool(value: &str) -> Option<bool> {
    match value {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

// ============================================================================
// FileStore
// ============================================================================

pub struct FileStore {
    path: PathBuf,
    // Serializes read-modify-write cycles on the file.
    lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            lock: Mutex::new(()),
        }
    }

    /// Returns the path to `~/.zico/storage.json`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".zico").join("storage.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_map(&self) -> Result<BTreeMap<String, String>, StoreError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(json) if json.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(json) => serde_json::from_str(&json).map_err(StoreError::Corrupt),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(StoreError::Io(e)),
        }
    }

    /// Atomically write the map as JSON (via `.tmp` + rename).
    async fn write_map(&self, map: &BTreeMap<String, String>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let tmp_path = self.path.with_extension("tmp");
        let json = serde_json::to_string_pretty(map).map_err(StoreError::Corrupt)?;
        tokio::fs::write(&tmp_path, json).await?;
        tokio::fs::rename(&tmp_path, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    fn name(&self) -> &str {
        "file"
    }

    async fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        let _guard = self.lock.lock().await;
        let map = self.read_map().await?;
        Ok(map.get(key).cloned())
    }

    async fn save(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;
        // A corrupt file is replaced rather than blocking every future save.
        let mut map = match self.read_map().await {
            Ok(map) => map,
            Err(StoreError::Corrupt(e)) => {
                warn!("Discarding corrupt storage file {}: {}", self.path.display(), e);
                BTreeMap::new()
            }
            Err(e) => return Err(e),
        };
        map.insert(key.to_string(), value.to_string());
        self.write_map(&map).await?;
        debug!("Saved '{}' to {}", key, self.path.display());
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::Io(e)),
        }
    }
}

// ============================================================================
// MemoryStore
// ============================================================================

/// Process-local store. Used when no storage location is available, and in tests.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn save(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        self.entries.lock().await.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FailingStore;

    #[test]
    fn test_bool_round_trip() {
        assert_eq!(decode_bool(encode_bool(true)), Some(true));
        assert_eq!(decode_bool(encode_bool(false)), Some(false));
        assert_eq!(decode_bool("TRUE"), None);
        assert_eq!(decode_bool("1"), None);
    }

    #[tokio::test]
    async fn test_memory_store_round_trip() {
        let store = MemoryStore::new();
        assert_eq!(store.load("k").await.unwrap(), None);
        store.save("k", "v1").await.unwrap();
        store.save("k", "v2").await.unwrap();
        assert_eq!(store.load("k").await.unwrap().as_deref(), Some("v2"));
        store.clear().await.unwrap();
        assert_eq!(store.load("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_persisted_bool_flag_round_trip() {
        let store = MemoryStore::new();
        store.save("@flag", encode_bool(true)).await.unwrap();
        let loaded = load_or_none(&store, "@flag").await;
        assert_eq!(loaded.as_deref().and_then(decode_bool), Some(true));
    }

    #[tokio::test]
    async fn test_load_or_none_swallows_failures() {
        let store = FailingStore;
        assert_eq!(load_or_none(&store, "anything").await, None);
    }
}
