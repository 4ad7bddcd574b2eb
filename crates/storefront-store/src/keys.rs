//! Storage key names.
//!
//! Full keys are `<namespace>_<name>`; with the default namespace they match
//! the browser storefront's localStorage keys (`ecommerce_cart`, ...).

/// Default key namespace.
pub const NAMESPACE: &str = "ecommerce";

pub const CART: &str = "cart";
pub const ORDERS: &str = "orders";
pub const USERS: &str = "users";
pub const CURRENT_USER: &str = "current_user";
pub const ADMIN_SESSION: &str = "admin_session";
pub const PRODUCTS: &str = "products";
pub const WISHLIST: &str = "wishlist";

/// Every key name.
pub const ALL: [&str; 7] = [
    CART,
    ORDERS,
    USERS,
    CURRENT_USER,
    ADMIN_SESSION,
    PRODUCTS,
    WISHLIST,
];
