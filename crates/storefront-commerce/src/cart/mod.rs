//! Shopping cart module.
//!
//! Contains types for cart lines, pricing, shipping and coupons.

mod cart;
mod discount;
mod pricing;

pub use cart::{check_availability, Cart, CartItem};
pub use discount::{default_coupons, find_coupon, Coupon, CouponKind};
pub use pricing::{CartSummary, ShippingPolicy};
