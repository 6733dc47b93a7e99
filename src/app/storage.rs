//! Durable key-value storage surviving restarts.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Client-local persistent string storage.
pub trait Storage {
    /// Read a value. Missing or unreadable entries are `None`.
    fn get(&self, key: &str) -> Option<String>;

    /// Overwrite a value.
    fn set(&mut self, key: &str, value: &str) -> io::Result<()>;
}

/// One file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.path(key)).ok()
    }

    fn set(&mut self, key: &str, value: &str) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)
    }
}

/// Volatile storage for tests and ephemeral sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> io::Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_file_storage_round_trip() {
        let tmp = tempdir().unwrap();
        let dir = tmp.path().join("data");
        let mut storage = FileStorage::new(&dir);
        assert_eq!(storage.get("savedAccount"), None);

        storage.set("savedAccount", r#"{"user":"a"}"#).unwrap();
        storage.set("savedAccount", "null").unwrap();
        assert_eq!(storage.get("savedAccount").as_deref(), Some("null"));
        assert!(!dir.join("savedAccount.json.tmp").exists());
    }

    #[test]
    fn test_memory_storage_overwrites() {
        let mut storage = MemoryStorage::new();
        storage.set("k", "1").unwrap();
        storage.set("k", "2").unwrap();
        assert_eq!(storage.get("k").as_deref(), Some("2"));
    }
}
