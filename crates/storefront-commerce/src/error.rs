//! Commerce error types.

use crate::ids::ProductId;
use thiserror::Error;

/// Errors that can occur in storefront operations.
///
/// The catalog engine itself never returns these; it degrades to empty
/// results instead. They surface from cart, checkout and persistence code.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Product not found.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// Order not found.
    #[error("Order not found: {0}")]
    OrderNotFound(String),

    /// Item not in cart.
    #[error("Item not in cart: {0}")]
    ItemNotInCart(ProductId),

    /// Product has no stock left.
    #[error("{name} is out of stock")]
    OutOfStock { name: String },

    /// Requested more than is available.
    #[error("Only {available} items available for {name}")]
    InsufficientStock {
        name: String,
        requested: i64,
        available: i64,
    },

    /// Invalid quantity.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Checkout attempted with nothing in the cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// Invalid coupon code.
    #[error("Invalid coupon code: {0}")]
    InvalidCoupon(String),

    /// Coupon minimum purchase not reached.
    #[error("Coupon {code} requires a subtotal of at least {minimum}")]
    CouponMinimumNotMet { code: String, minimum: i64 },

    /// Order cannot move to the requested status.
    #[error("Order {id} cannot be cancelled from status {status}")]
    InvalidStatusTransition { id: String, status: String },

    /// Customer details rejected.
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// Persistence backend error.
    #[error("Storage error: {0}")]
    StorageError(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::SerializationError(e.to_string())
    }
}

/// Result alias used across the crate.
pub type CommerceResult<T> = Result<T, CommerceError>;
