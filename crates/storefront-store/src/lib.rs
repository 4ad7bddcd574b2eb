//! Typed key-value persistence for the storefront.
//!
//! Provides a JSON cache over pluggable byte backends (memory or a directory
//! of files), and a [`StorageManager`] holding the shopper's cart, wishlist,
//! orders, accounts and the admin session under stable keys.
//!
//! # Example
//!
//! ```rust
//! use storefront_store::{Cache, StorageManager};
//!
//! let storage = StorageManager::new(Cache::open_default());
//! storage.initialize().unwrap();
//!
//! assert!(storage.cart().is_empty());
//! assert!(storage.cache().exists("ecommerce_cart").unwrap());
//! ```

mod backend;
mod checkout;
mod error;
pub mod keys;
mod kv;
mod manager;
mod session;

pub use backend::{FileBackend, KvBackend, MemoryBackend};
pub use checkout::Checkout;
pub use error::{StoreError, StoreResult};
pub use kv::Cache;
pub use manager::{CartObserver, CartUpdate, ProductStore, StorageManager};
pub use session::{AdminSession, NewUser, SessionId, User};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        Cache, CartObserver, CartUpdate, Checkout, StorageManager, StoreError, StoreResult,
    };
}
