use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum StatisticsError {
    #[error("Failed to write statistics: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to encode statistics: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid game result: {correct} correct out of {total}")]
    InvalidResult { correct: u32, total: u32 },
}

/// A flat, durable map of named values.
pub trait KeyValueStore: Send {
    fn get(&self, key: &str) -> Option<Value>;

    fn set(&mut self, key: &str, value: Value) -> Result<(), StatisticsError>;

    /// Store several values together. Persistent stores write them out once.
    fn set_many(&mut self, entries: Vec<(&str, Value)>) -> Result<(), StatisticsError> {
        for (key, value) in entries {
            self.set(key, value)?;
        }
        Ok(())
    }
}

/// Keeps every value in one JSON object on disk, replaced atomically on each
/// write.
pub struct JsonFileStore {
    path: PathBuf,
    values: Map<String, Value>,
}

impl JsonFileStore {
    /// Open the store at `path`. A missing file starts empty, and so does an
    /// unreadable one (with a warning) rather than failing the game.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StatisticsError> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let values = match fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<Map<String, Value>>(&content) {
                Ok(values) => values,
                Err(e) => {
                    warn!("Ignoring malformed statistics file {}: {}", path.display(), e);
                    Map::new()
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => Map::new(),
            Err(e) => return Err(e.into()),
        };

        info!("Opened statistics store at {}", path.display());
        Ok(Self { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), StatisticsError> {
        let content = serde_json::to_string_pretty(&self.values)?;
        let parent = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut temp = NamedTempFile::new_in(parent)?;
        temp.write_all(content.as_bytes())?;
        temp.flush()?;
        temp.persist(&self.path).map_err(|e| e.error)?;
        debug!("Wrote statistics to {}", self.path.display());
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: Value) -> Result<(), StatisticsError> {
        self.values.insert(key.to_string(), value);
        self.flush()
    }

    fn set_many(&mut self, entries: Vec<(&str, Value)>) -> Result<(), StatisticsError> {
        for (key, value) in entries {
            self.values.insert(key.to_string(), value);
        }
        self.flush()
    }
}

/// Non-persistent store, for tests and for running without a data directory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: HashMap<String, Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: Value) -> Result<(), StatisticsError> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stats").join("statistics.json");

        {
            let mut store = JsonFileStore::open(&path).unwrap();
            store.set("gamesCount", json!(3)).unwrap();
            store.set("bestGame", json!({ "correct": 9 })).unwrap();
        }

        let store = JsonFileStore::open(&path).unwrap();
        assert_eq!(store.get("gamesCount"), Some(json!(3)));
        assert_eq!(store.get("bestGame"), Some(json!({ "correct": 9 })));
        assert_eq!(store.get("missing"), None);
    }

    #[test]
    fn test_missing_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path().join("nope.json")).unwrap();
        assert_eq!(store.get("gamesCount"), None);
    }

    #[test]
    fn test_malformed_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("statistics.json");
        fs::write(&path, "not json at all").unwrap();

        let mut store = JsonFileStore::open(&path).unwrap();
        assert_eq!(store.get("gamesCount"), None);

        store.set("gamesCount", json!(1)).unwrap();
        let reopened = JsonFileStore::open(&path).unwrap();
        assert_eq!(reopened.get("gamesCount"), Some(json!(1)));
    }

    #[test]
    fn test_writes_leave_only_the_store_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("statistics.json");

        let mut store = JsonFileStore::open(&path).unwrap();
        store.set("gamesCount", json!(1)).unwrap();
        store
            .set_many(vec![("gamesCount", json!(2)), ("correct", json!(15))])
            .unwrap();

        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("statistics.json")]);

        let reopened = JsonFileStore::open(&path).unwrap();
        assert_eq!(reopened.get("gamesCount"), Some(json!(2)));
        assert_eq!(reopened.get("correct"), Some(json!(15)));
    }

    #[test]
    fn test_set_many_on_memory_store() {
        let mut store = MemoryStore::new();
        store
            .set_many(vec![("total", json!(10)), ("correct", json!(7))])
            .unwrap();
        assert_eq!(store.get("total"), Some(json!(10)));
        assert_eq!(store.get("correct"), Some(json!(7)));
    }
}
