//! Persistence seam for admin-edited catalogs.

use crate::catalog::Product;
use crate::error::{CommerceError, CommerceResult};
use std::sync::{Arc, Mutex};

/// Where the engine writes the full product list after admin mutations.
///
/// Writes are best-effort: the engine logs a failed save and keeps serving
/// its in-memory state.
pub trait CatalogStore {
    /// Persist the full product list.
    fn save_products(&self, products: &[Product]) -> CommerceResult<()>;

    /// Load a previously persisted product list, if one exists.
    fn load_products(&self) -> CommerceResult<Option<Vec<Product>>>;
}

impl<T: CatalogStore + ?Sized> CatalogStore for Arc<T> {
    fn save_products(&self, products: &[Product]) -> CommerceResult<()> {
        (**self).save_products(products)
    }

    fn load_products(&self) -> CommerceResult<Option<Vec<Product>>> {
        (**self).load_products()
    }
}

/// Store that keeps nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullCatalogStore;

impl CatalogStore for NullCatalogStore {
    fn save_products(&self, _products: &[Product]) -> CommerceResult<()> {
        Ok(())
    }

    fn load_products(&self) -> CommerceResult<Option<Vec<Product>>> {
        Ok(None)
    }
}

/// In-process store, mainly for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryCatalogStore {
    products: Mutex<Option<Vec<Product>>>,
    fail_writes: Mutex<bool>,
    saves: Mutex<usize>,
}

impl MemoryCatalogStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding an existing snapshot.
    pub fn with_snapshot(products: Vec<Product>) -> Self {
        Self {
            products: Mutex::new(Some(products)),
            ..Self::default()
        }
    }

    /// Make subsequent saves fail, as a full browser quota would.
    pub fn set_fail_writes(&self, fail: bool) {
        if let Ok(mut flag) = self.fail_writes.lock() {
            *flag = fail;
        }
    }

    /// The last successfully saved snapshot.
    pub fn snapshot(&self) -> Option<Vec<Product>> {
        self.products.lock().ok().and_then(|p| p.clone())
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> usize {
        self.saves.lock().map(|s| *s).unwrap_or(0)
    }
}

impl CatalogStore for MemoryCatalogStore {
    fn save_products(&self, products: &[Product]) -> CommerceResult<()> {
        let failing = self.fail_writes.lock().map(|f| *f).unwrap_or(false);
        if failing {
            return Err(CommerceError::StorageError("quota exceeded".to_string()));
        }
        let mut slot = self
            .products
            .lock()
            .map_err(|e| CommerceError::StorageError(e.to_string()))?;
        *slot = Some(products.to_vec());
        if let Ok(mut saves) = self.saves.lock() {
            *saves += 1;
        }
        Ok(())
    }

    fn load_products(&self) -> CommerceResult<Option<Vec<Product>>> {
        let slot = self
            .products
            .lock()
            .map_err(|e| CommerceError::StorageError(e.to_string()))?;
        Ok(slot.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::product;

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryCatalogStore::new();
        assert!(store.load_products().unwrap().is_none());

        store.save_products(&[product(1, 100, 4.0, false)]).unwrap();
        let loaded = store.load_products().unwrap().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(store.save_count(), 1);
    }

    #[test]
    fn test_memory_store_failing_writes_keep_old_snapshot() {
        let store = MemoryCatalogStore::with_snapshot(vec![product(1, 100, 4.0, false)]);
        store.set_fail_writes(true);

        let result = store.save_products(&[]);
        assert!(matches!(result, Err(CommerceError::StorageError(_))));
        assert_eq!(store.snapshot().unwrap().len(), 1);
    }
}
