//! Cart pricing calculations.

use crate::cart::{Cart, Coupon};
use crate::error::{CommerceError, CommerceResult};
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Shipping charge rule.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShippingPolicy {
    /// Subtotals strictly above this ship free.
    #[serde(default = "default_free_threshold")]
    pub free_threshold: i64,
    /// Charge for everything else.
    #[serde(default = "default_flat_rate")]
    pub flat_rate: i64,
}

fn default_free_threshold() -> i64 {
    2000
}

fn default_flat_rate() -> i64 {
    100
}

impl Default for ShippingPolicy {
    fn default() -> Self {
        Self {
            free_threshold: default_free_threshold(),
            flat_rate: default_flat_rate(),
        }
    }
}

impl ShippingPolicy {
    /// Shipping for `subtotal`: 0 for an empty cart or above the threshold.
    pub fn shipping_for(&self, subtotal: i64) -> i64 {
        if subtotal <= 0 || subtotal > self.free_threshold {
            0
        } else {
            self.flat_rate
        }
    }

    /// How much more to spend for free shipping, if anything.
    pub fn free_shipping_remaining(&self, subtotal: i64) -> Option<i64> {
        if subtotal > 0 && subtotal < self.free_threshold {
            Some(self.free_threshold - subtotal)
        } else {
            None
        }
    }
}

/// Complete pricing breakdown for a cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartSummary {
    /// Sum of quantities.
    pub item_count: i64,
    /// Sum of `price * quantity`.
    pub subtotal: Money,
    /// Sum of per-line sale savings.
    pub savings: Money,
    /// Applied coupon code.
    pub coupon_code: Option<String>,
    /// Coupon discount amount.
    pub coupon_discount: Money,
    /// Shipping cost.
    pub shipping: Money,
    /// Final total (subtotal - coupon + shipping).
    pub total: Money,
    /// Amount left to spend for free shipping.
    pub free_shipping_remaining: Option<Money>,
}

impl CartSummary {
    /// Price `cart` under `policy`, applying `coupon` if given.
    ///
    /// Returns an error if the coupon's minimum is not met or on overflow.
    pub fn calculate(
        cart: &Cart,
        policy: &ShippingPolicy,
        coupon: Option<&Coupon>,
        currency: Currency,
    ) -> CommerceResult<Self> {
        let subtotal = cart
            .items()
            .iter()
            .try_fold(0_i64, |acc, i| {
                i.product
                    .price
                    .checked_mul(i.quantity)
                    .and_then(|line| acc.checked_add(line))
            })
            .ok_or(CommerceError::Overflow)?;
        let savings = cart
            .items()
            .iter()
            .fold(0_i64, |acc, i| acc.saturating_add(i.line_savings()));

        let coupon_discount = match coupon {
            Some(coupon) => coupon.discount_for(subtotal)?,
            None => 0,
        };
        let shipping = policy.shipping_for(subtotal);
        let total = subtotal
            .checked_sub(coupon_discount)
            .and_then(|t| t.checked_add(shipping))
            .ok_or(CommerceError::Overflow)?;

        let money = |amount| Money::new(amount, currency);
        Ok(Self {
            item_count: cart.item_count(),
            subtotal: money(subtotal),
            savings: money(savings),
            coupon_code: coupon.map(|c| c.code.clone()),
            coupon_discount: money(coupon_discount),
            shipping: money(shipping),
            total: money(total),
            free_shipping_remaining: policy.free_shipping_remaining(subtotal).map(money),
        })
    }

    /// Check if shipping is free for a non-empty cart.
    pub fn is_free_shipping(&self) -> bool {
        self.shipping.is_zero() && !self.subtotal.is_zero()
    }

    pub fn has_savings(&self) -> bool {
        self.savings.amount > 0
    }

    pub fn has_coupon(&self) -> bool {
        self.coupon_discount.amount > 0
    }
}
