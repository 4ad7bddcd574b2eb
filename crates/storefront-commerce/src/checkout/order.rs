//! Order types.

use crate::cart::{Cart, CartItem, CartSummary};
use crate::checkout::Customer;
use crate::error::{CommerceError, CommerceResult};
use crate::ids::OrderId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Order status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Order placed, awaiting processing.
    #[default]
    Pending,
    /// Order being prepared.
    Processing,
    /// Order shipped.
    Shipped,
    /// Order delivered.
    Delivered,
    /// Order cancelled.
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::Processing,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Processing => "Processing",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
        }
    }

    /// Check if order is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// Check if order can be cancelled.
    pub fn can_cancel(&self) -> bool {
        !self.is_terminal()
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == wanted)
            .ok_or_else(|| CommerceError::ValidationError(format!("unknown order status: {s}")))
    }
}

/// Everything needed to record an order, before it has an id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderDraft {
    pub customer: Customer,
    pub items: Vec<CartItem>,
    pub subtotal: i64,
    /// Product sale savings.
    pub discount: i64,
    pub coupon_code: Option<String>,
    pub coupon_discount: i64,
    pub shipping: i64,
    pub total: i64,
}

impl OrderDraft {
    /// Snapshot `cart` priced by `summary` for `customer`.
    ///
    /// Returns an error if the customer is invalid or the cart is empty.
    pub fn new(customer: Customer, cart: &Cart, summary: &CartSummary) -> CommerceResult<Self> {
        customer.validate()?;
        if cart.is_empty() {
            return Err(CommerceError::EmptyCart);
        }
        Ok(Self {
            customer,
            items: cart.items().to_vec(),
            subtotal: summary.subtotal.amount,
            discount: summary.savings.amount,
            coupon_code: summary.coupon_code.clone(),
            coupon_discount: summary.coupon_discount.amount,
            shipping: summary.shipping.amount,
            total: summary.total.amount,
        })
    }

    /// Turn the draft into a pending order.
    pub fn into_order(self, id: OrderId, created_at: DateTime<Utc>) -> Order {
        Order {
            id,
            customer: self.customer,
            items: self.items,
            subtotal: self.subtotal,
            discount: self.discount,
            coupon_code: self.coupon_code,
            coupon_discount: self.coupon_discount,
            shipping: self.shipping,
            total: self.total,
            status: OrderStatus::Pending,
            created_at,
            updated_at: None,
        }
    }
}

/// A recorded order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// `ORD<millis>`.
    pub id: OrderId,
    pub customer: Customer,
    pub items: Vec<CartItem>,
    /// Subtotal before coupon and shipping.
    pub subtotal: i64,
    /// Product sale savings.
    pub discount: i64,
    #[serde(default)]
    pub coupon_code: Option<String>,
    #[serde(default)]
    pub coupon_discount: i64,
    pub shipping: i64,
    /// Amount charged.
    pub total: i64,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Order {
    /// Get total item count.
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Update order status.
    pub fn set_status(&mut self, status: OrderStatus, now: DateTime<Utc>) {
        self.status = status;
        self.updated_at = Some(now);
    }

    /// Cancel the order unless it is already delivered or cancelled.
    pub fn cancel(&mut self, now: DateTime<Utc>) -> CommerceResult<()> {
        if !self.status.can_cancel() {
            return Err(CommerceError::InvalidStatusTransition {
                id: self.id.to_string(),
                status: self.status.to_string(),
            });
        }
        self.set_status(OrderStatus::Cancelled, now);
        Ok(())
    }
}
