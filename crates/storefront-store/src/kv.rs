//! Key-Value store wrapper with automatic serialization.

use crate::backend::{FileBackend, KvBackend, MemoryBackend};
use crate::StoreResult;
use serde::{de::DeserializeOwned, Serialize};
use std::path::Path;
use std::sync::Arc;

/// Type-safe cache over a [`KvBackend`].
///
/// Provides automatic JSON serialization for any type that implements
/// `Serialize` and `DeserializeOwned`. Clones share the same backend.
#[derive(Clone)]
pub struct Cache {
    backend: Arc<dyn KvBackend>,
}

impl std::fmt::Debug for Cache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cache").finish_non_exhaustive()
    }
}

impl Cache {
    /// Open an in-memory store.
    ///
    /// # Example
    ///
    /// ```rust
    /// let cache = storefront_store::Cache::open_default();
    /// cache.set("greeting", &"hello").unwrap();
    /// ```
    pub fn open_default() -> Self {
        Self::with_backend(MemoryBackend::new())
    }

    /// Open a sled-backed store in `dir`, creating it if needed.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let cache = Cache::open("./.storefront")?;
    /// ```
    pub fn open(dir: impl AsRef<Path>) -> StoreResult<Self> {
        Ok(Self::with_backend(FileBackend::open(dir)?))
    }

    /// Wrap any backend.
    pub fn with_backend(backend: impl KvBackend + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// Get a value from the cache.
    ///
    /// Returns `None` if the key doesn't exist.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let cart: Option<Cart> = cache.get("ecommerce_cart")?;
    /// ```
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> StoreResult<Option<T>> {
        match self.backend.get(key)? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Set a value in the cache.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// cache.set("ecommerce_cart", &cart)?;
    /// ```
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> StoreResult<()> {
        let bytes = serde_json::to_vec(value)?;
        self.backend.set(key, &bytes)
    }

    /// Delete a value from the cache.
    pub fn delete(&self, key: &str) -> StoreResult<()> {
        self.backend.delete(key)
    }

    /// Check if a key exists in the cache.
    pub fn exists(&self, key: &str) -> StoreResult<bool> {
        self.backend.exists(key)
    }

    /// Get all keys in the cache.
    pub fn keys(&self) -> StoreResult<Vec<String>> {
        self.backend.keys()
    }
}

/// Helper to build storage keys with namespacing.
///
/// # Example
///
/// ```rust
/// let key = storefront_store::cache_key!("ecommerce", "cart");
/// assert_eq!(key, "ecommerce_cart");
/// ```
#[macro_export]
macro_rules! cache_key {
    ($prefix:expr, $($part:expr),+) => {{
        let mut key = String::from($prefix);
        $(
            key.push('_');
            key.push_str(&$part.to_string());
        )+
        key
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StoreError;
    use serde::Deserialize;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Line {
        id: u64,
        quantity: i64,
    }

    #[test]
    fn test_typed_round_trip() {
        let cache = Cache::open_default();
        let lines = vec![Line { id: 1, quantity: 2 }];
        cache.set("lines", &lines).unwrap();

        let loaded: Vec<Line> = cache.get("lines").unwrap().unwrap();
        assert_eq!(loaded, lines);
        assert!(cache.exists("lines").unwrap());
        assert_eq!(cache.keys().unwrap(), vec!["lines".to_string()]);
    }

    #[test]
    fn test_missing_key_is_none() {
        let cache = Cache::open_default();
        let value: Option<Vec<Line>> = cache.get("nothing").unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn test_corrupt_value_is_error() {
        let backend = MemoryBackend::new();
        backend.set("lines", b"{not json").unwrap();
        let cache = Cache::with_backend(backend);
        let result: StoreResult<Option<Vec<Line>>> = cache.get("lines");
        assert!(matches!(result, Err(StoreError::SerializeError(_))));
    }

    #[test]
    fn test_clones_share_backend() {
        let cache = Cache::open_default();
        let other = cache.clone();
        cache.set("n", &5).unwrap();
        assert_eq!(other.get::<i32>("n").unwrap(), Some(5));
    }

    #[test]
    fn test_cache_key_macro() {
        assert_eq!(cache_key!("ecommerce", "admin", "session"), "ecommerce_admin_session");
    }
}
