use std::collections::{HashMap, HashSet};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use crate::error::StorageError;

pub const WATCHLIST_KEY: &str = "crypto-watchlist";

/// Local string key/value store the dashboard persists into.
pub trait WatchlistStore {
    fn read(&self, key: &str) -> Option<String>;
    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.values.insert(key.to_string(), value.to_string());
        store
    }
}

impl WatchlistStore for MemoryStore {
    fn read(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// One file per key inside `dir`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl WatchlistStore for FileStore {
    fn read(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.path_for(key)).ok()
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir).map_err(|e| StorageError::Write(e.to_string()))?;
        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(self.path_for(key))
            .map_err(|e| StorageError::Write(e.to_string()))?;
        file.write_all(value.as_bytes())
            .map_err(|e| StorageError::Write(e.to_string()))?;
        Ok(())
    }
}

/// Reads the persisted watchlist, a JSON array of coin ids.
pub fn restore_watchlist<S: WatchlistStore>(store: &S) -> Result<HashSet<String>, StorageError> {
    let raw = store.read(WATCHLIST_KEY).ok_or(StorageError::Missing)?;
    let ids: Vec<String> =
        serde_json::from_str(&raw).map_err(|e| StorageError::Unparsable(e.to_string()))?;
    Ok(ids.into_iter().collect())
}

/// Writes the watchlist as a sorted JSON array so the stored text only depends
/// on membership.
pub fn persist_watchlist<S: WatchlistStore>(
    store: &mut S,
    watchlist: &HashSet<String>,
) -> Result<(), StorageError> {
    let mut ids: Vec<&String> = watchlist.iter().collect();
    ids.sort();
    let encoded = serde_json::to_string(&ids).map_err(|e| StorageError::Write(e.to_string()))?;
    store.write(WATCHLIST_KEY, &encoded)
}
