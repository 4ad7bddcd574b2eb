//! Storefront domain types and logic.
//!
//! This crate provides the pieces of a small storefront:
//!
//! - **Catalog**: Products, categories, the catalog query engine, a seeded generator
//! - **Search**: Filter state, sort keys, pagination
//! - **Cart**: Cart lines, availability checks, coupons, pricing summary
//! - **Checkout**: Customer validation, orders, invoices
//!
//! # Example
//!
//! ```rust
//! use storefront_commerce::prelude::*;
//!
//! let mut engine = CatalogEngine::default();
//! engine.initialize(generate_catalog(42));
//!
//! engine.filter_by_category(Some("Electronics"), None);
//! engine.sort(SortKey::PriceLow);
//!
//! let page = engine.get_page(1, 20);
//! assert!(page.items.windows(2).all(|w| w[0].price <= w[1].price));
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod display;
pub mod search;
pub mod wishlist;

pub use error::{CommerceError, CommerceResult};
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::{CommerceError, CommerceResult};
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{
        generate_catalog, CatalogData, CatalogEngine, CatalogStore, Category, NewProduct,
        Product, ProductPatch, Review,
    };

    // Search
    pub use crate::search::{FilterState, Page, SortKey};

    // Cart
    pub use crate::cart::{Cart, CartItem, CartSummary, Coupon, CouponKind, ShippingPolicy};

    // Checkout
    pub use crate::checkout::{Customer, Invoice, Order, OrderDraft, OrderStatus};

    pub use crate::wishlist::{Wishlist, WishlistEntry};
}
