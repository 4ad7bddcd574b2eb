//! Store error types.

use storefront_commerce::CommerceError;
use thiserror::Error;

/// Errors that can occur when using the store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to open the store.
    #[error("Failed to open store: {0}")]
    OpenError(String),

    /// Failed to serialize or parse a value.
    #[error("Serialization error: {0}")]
    SerializeError(#[from] serde_json::Error),

    /// Failed to perform store operation.
    #[error("Store operation failed: {0}")]
    StoreError(String),

    /// Write would exceed the configured byte quota.
    #[error("Storage quota exceeded writing {key}: {needed} bytes needed, {limit} allowed")]
    QuotaExceeded {
        key: String,
        needed: usize,
        limit: usize,
    },

    /// Key cannot be used as a storage name.
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] sled::Error),

    /// Domain rule rejected the operation.
    #[error(transparent)]
    Commerce(#[from] CommerceError),
}

/// Result alias used across the crate.
pub type StoreResult<T> = Result<T, StoreError>;

impl From<StoreError> for CommerceError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Commerce(inner) => inner,
            other => CommerceError::StorageError(other.to_string()),
        }
    }
}
