//! Raw byte backends for the cache.

use crate::{StoreError, StoreResult};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// A key-value store of raw bytes.
pub trait KvBackend: Send + Sync {
    /// Get the bytes stored under `key`.
    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &[u8]) -> StoreResult<()>;

    /// Remove `key`. Missing keys are not an error.
    fn delete(&self, key: &str) -> StoreResult<()>;

    /// Check if `key` is present.
    fn exists(&self, key: &str) -> StoreResult<bool> {
        Ok(self.get(key)?.is_some())
    }

    /// All keys, sorted.
    fn keys(&self) -> StoreResult<Vec<String>>;
}

/// In-process backend with an optional byte quota.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: RwLock<BTreeMap<String, Vec<u8>>>,
    quota: Option<usize>,
}

impl MemoryBackend {
    /// Create an unbounded backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a backend refusing writes that push the total of keys and
    /// values above `bytes`.
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            entries: RwLock::default(),
            quota: Some(bytes),
        }
    }

    /// Total bytes of keys and values currently held.
    pub fn used_bytes(&self) -> usize {
        self.entries
            .read()
            .map(|entries| entries.iter().map(|(k, v)| k.len() + v.len()).sum())
            .unwrap_or(0)
    }
}

fn poisoned<T>(_: T) -> StoreError {
    StoreError::StoreError("lock poisoned".to_string())
}

impl KvBackend for MemoryBackend {
    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        let entries = self.entries.read().map_err(poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &[u8]) -> StoreResult<()> {
        let mut entries = self.entries.write().map_err(poisoned)?;
        if let Some(limit) = self.quota {
            let others: usize = entries
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            let needed = others + key.len() + value.len();
            if needed > limit {
                return Err(StoreError::QuotaExceeded {
                    key: key.to_string(),
                    needed,
                    limit,
                });
            }
        }
        entries.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn delete(&self, key: &str) -> StoreResult<()> {
        let mut entries = self.entries.write().map_err(poisoned)?;
        entries.remove(key);
        Ok(())
    }

    fn exists(&self, key: &str) -> StoreResult<bool> {
        let entries = self.entries.read().map_err(poisoned)?;
        Ok(entries.contains_key(key))
    }

    fn keys(&self) -> StoreResult<Vec<String>> {
        let entries = self.entries.read().map_err(poisoned)?;
        Ok(entries.keys().cloned().collect())
    }
}

/// Backend over a `sled` database stored in a directory.
///
/// Only one handle may hold a directory at a time; sled locks it. Every
/// write is flushed before returning, so no background flusher runs.
#[derive(Clone)]
pub struct FileBackend {
    db: sled::Db,
    dir: PathBuf,
}

impl std::fmt::Debug for FileBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileBackend").field("dir", &self.dir).finish()
    }
}

impl FileBackend {
    /// Open (and create if needed) the database at `dir`.
    pub fn open(dir: impl AsRef<Path>) -> StoreResult<Self> {
        let dir = dir.as_ref().to_path_buf();
        let db = sled::Config::new()
            .path(&dir)
            .mode(sled::Mode::HighThroughput)
            .flush_every_ms(None)
            .open()
            .map_err(|e| StoreError::OpenError(format!("{}: {}", dir.display(), e)))?;
        Ok(Self { db, dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn check_key(key: &str) -> StoreResult<()> {
        if key.trim().is_empty() {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(())
    }
}

impl KvBackend for FileBackend {
    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        Self::check_key(key)?;
        Ok(self.db.get(key)?.map(|bytes| bytes.to_vec()))
    }

    fn set(&self, key: &str, value: &[u8]) -> StoreResult<()> {
        Self::check_key(key)?;
        self.db.insert(key, value)?;
        self.db.flush()?;
        Ok(())
    }

    fn delete(&self, key: &str) -> StoreResult<()> {
        Self::check_key(key)?;
        if self.db.remove(key)?.is_some() {
            self.db.flush()?;
        }
        Ok(())
    }

    fn exists(&self, key: &str) -> StoreResult<bool> {
        Self::check_key(key)?;
        Ok(self.db.contains_key(key)?)
    }

    fn keys(&self) -> StoreResult<Vec<String>> {
        let mut keys = Vec::new();
        for key in self.db.iter().keys() {
            let key = key?;
            keys.push(String::from_utf8_lossy(&key).into_owned());
        }
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_backend_round_trip() {
        let backend = MemoryBackend::new();
        backend.set("a", b"[1]").unwrap();
        assert_eq!(backend.get("a").unwrap().unwrap(), b"[1]");
        assert!(backend.exists("a").unwrap());
        backend.delete("a").unwrap();
        assert!(backend.get("a").unwrap().is_none());
        backend.delete("a").unwrap();
    }

    #[test]
    fn test_memory_quota() {
        let backend = MemoryBackend::with_quota(10);
        backend.set("k", b"12345").unwrap();
        // Replacing a value only counts the new size.
        backend.set("k", b"123456789").unwrap();
        let err = backend.set("k2", b"1").unwrap_err();
        assert!(matches!(err, StoreError::QuotaExceeded { limit: 10, .. }));
        assert_eq!(backend.get("k").unwrap().unwrap(), b"123456789");
        assert_eq!(backend.used_bytes(), 10);
    }

    #[test]
    fn test_file_backend_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::open(dir.path().join("data")).unwrap();

        backend.set("ecommerce_cart", b"[]").unwrap();
        backend.set("ecommerce_orders", b"[]").unwrap();
        assert_eq!(backend.get("ecommerce_cart").unwrap().unwrap(), b"[]");
        assert_eq!(
            backend.keys().unwrap(),
            vec!["ecommerce_cart".to_string(), "ecommerce_orders".to_string()]
        );

        backend.delete("ecommerce_cart").unwrap();
        assert!(!backend.exists("ecommerce_cart").unwrap());
        assert!(backend.get("ecommerce_cart").unwrap().is_none());
    }

    #[test]
    fn test_file_backend_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let backend = FileBackend::open(dir.path()).unwrap();
            backend.set("ecommerce_orders", b"[{\"id\":\"ORD1\"}]").unwrap();
            backend.set("ecommerce_orders", b"[]").unwrap();
        }
        let backend = FileBackend::open(dir.path()).unwrap();
        assert_eq!(backend.get("ecommerce_orders").unwrap().unwrap(), b"[]");
    }

    #[test]
    fn test_file_backend_rejects_blank_keys() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::open(dir.path()).unwrap();
        assert!(matches!(backend.set(" ", b"x"), Err(StoreError::InvalidKey(_))));
        assert!(matches!(backend.get(""), Err(StoreError::InvalidKey(_))));
    }
}
