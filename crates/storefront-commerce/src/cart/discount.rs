//! Coupon codes.

use crate::error::{CommerceError, CommerceResult};
use serde::{Deserialize, Serialize};

/// How a coupon reduces the subtotal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CouponKind {
    /// `value` percent off (0-100).
    Percent,
    /// `value` off in the smallest currency unit.
    Fixed,
}

impl CouponKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CouponKind::Percent => "percent",
            CouponKind::Fixed => "fixed",
        }
    }
}

/// A coupon definition.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Coupon {
    /// Code entered by the customer (e.g., "SAVE10").
    pub code: String,
    /// Type of discount.
    pub kind: CouponKind,
    /// Percent or amount, depending on `kind`.
    pub value: i64,
    /// Subtotal required before the coupon applies.
    #[serde(default, alias = "minimum_subtotal")]
    pub minimum_subtotal: i64,
}

impl Coupon {
    /// Create a percentage coupon.
    pub fn percent(code: impl Into<String>, percent: i64) -> Self {
        Self {
            code: code.into(),
            kind: CouponKind::Percent,
            value: percent.clamp(0, 100),
            minimum_subtotal: 0,
        }
    }

    /// Create a fixed amount coupon.
    pub fn fixed(code: impl Into<String>, amount: i64) -> Self {
        Self {
            code: code.into(),
            kind: CouponKind::Fixed,
            value: amount.max(0),
            minimum_subtotal: 0,
        }
    }

    /// Require a minimum subtotal.
    pub fn with_minimum(mut self, minimum: i64) -> Self {
        self.minimum_subtotal = minimum;
        self
    }

    /// Check whether `code` names this coupon, ignoring case.
    pub fn matches(&self, code: &str) -> bool {
        self.code.eq_ignore_ascii_case(code.trim())
    }

    /// Discount for `subtotal`, never more than the subtotal itself.
    pub fn discount_for(&self, subtotal: i64) -> CommerceResult<i64> {
        if subtotal < self.minimum_subtotal {
            return Err(CommerceError::CouponMinimumNotMet {
                code: self.code.clone(),
                minimum: self.minimum_subtotal,
            });
        }

        let amount = match self.kind {
            CouponKind::Percent => {
                let percent = self.value.clamp(0, 100) as f64;
                (subtotal as f64 * percent / 100.0).round() as i64
            }
            CouponKind::Fixed => self.value.max(0),
        };
        Ok(amount.min(subtotal).max(0))
    }

    /// Short description (e.g., "10% off" or "200 off").
    pub fn describe(&self) -> String {
        match self.kind {
            CouponKind::Percent => format!("{}% off", self.value),
            CouponKind::Fixed => format!("{} off", self.value),
        }
    }
}

/// Look up a coupon by code, ignoring case.
pub fn find_coupon<'a>(coupons: &'a [Coupon], code: &str) -> CommerceResult<&'a Coupon> {
    coupons
        .iter()
        .find(|c| c.matches(code))
        .ok_or_else(|| CommerceError::InvalidCoupon(code.to_string()))
}

/// Coupons available when no configuration overrides them.
pub fn default_coupons() -> Vec<Coupon> {
    vec![
        Coupon::percent("WELCOME10", 10),
        Coupon::fixed("SAVE200", 200).with_minimum(1500),
        Coupon::percent("MEGA25", 25).with_minimum(10000),
    ]
}
