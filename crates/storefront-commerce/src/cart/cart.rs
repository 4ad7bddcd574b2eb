//! Cart and line item types.

use crate::catalog::Product;
use crate::error::{CommerceError, CommerceResult};
use crate::ids::ProductId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A line in the cart: a product snapshot plus quantity.
///
/// Serialized flat, so a stored line is a product object with two extra
/// fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Product snapshot taken when the line was created.
    #[serde(flatten)]
    pub product: Product,
    /// Quantity, at least 1.
    pub quantity: i64,
    /// When the line was created.
    pub added_at: DateTime<Utc>,
}

impl CartItem {
    /// Create a new line.
    pub fn new(product: Product, quantity: i64, added_at: DateTime<Utc>) -> Self {
        Self {
            product,
            quantity,
            added_at,
        }
    }

    pub fn id(&self) -> ProductId {
        self.product.id
    }

    /// `price * quantity`.
    pub fn line_total(&self) -> i64 {
        self.product.price.saturating_mul(self.quantity)
    }

    /// `(originalPrice - price) * quantity`, 0 when not on sale.
    pub fn line_savings(&self) -> i64 {
        self.product.savings_per_unit().saturating_mul(self.quantity)
    }
}

/// A shopping cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cart from stored lines.
    pub fn from_items(items: Vec<CartItem>) -> Self {
        Self { items }
    }

    /// Add `quantity` of `product`, merging into an existing line.
    ///
    /// Returns an error if:
    /// - Quantity is not positive
    /// - The product has no stock
    /// - The requested quantity is above the product's stock
    pub fn add_item(
        &mut self,
        product: &Product,
        quantity: i64,
        now: DateTime<Utc>,
    ) -> CommerceResult<()> {
        if quantity <= 0 {
            return Err(CommerceError::InvalidQuantity(quantity));
        }
        check_availability(product, quantity)?;

        if let Some(existing) = self.items.iter_mut().find(|i| i.id() == product.id) {
            existing.quantity = existing
                .quantity
                .checked_add(quantity)
                .ok_or(CommerceError::Overflow)?;
            return Ok(());
        }

        self.items
            .push(CartItem::new(product.clone(), quantity, now));
        Ok(())
    }

    /// Set a line's quantity, clamped to at least 1.
    ///
    /// Returns false when the product is not in the cart.
    pub fn set_quantity(&mut self, product_id: ProductId, quantity: i64) -> bool {
        match self.items.iter_mut().find(|i| i.id() == product_id) {
            Some(item) => {
                item.quantity = quantity.max(1);
                true
            }
            None => false,
        }
    }

    /// Change a line's quantity, checking it against the line's stock.
    ///
    /// A quantity below 1 removes the line.
    pub fn update_quantity(&mut self, product_id: ProductId, quantity: i64) -> CommerceResult<()> {
        if quantity < 1 {
            return if self.remove_item(product_id) {
                Ok(())
            } else {
                Err(CommerceError::ItemNotInCart(product_id))
            };
        }

        let item = self
            .items
            .iter_mut()
            .find(|i| i.id() == product_id)
            .ok_or(CommerceError::ItemNotInCart(product_id))?;
        check_availability(&item.product, quantity)?;
        item.quantity = quantity;
        Ok(())
    }

    /// Remove a line. Returns whether it was present.
    pub fn remove_item(&mut self, product_id: ProductId) -> bool {
        let len_before = self.items.len();
        self.items.retain(|i| i.id() != product_id);
        self.items.len() < len_before
    }

    /// Clear all lines.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn into_items(self) -> Vec<CartItem> {
        self.items
    }

    pub fn get_item(&self, product_id: ProductId) -> Option<&CartItem> {
        self.items.iter().find(|i| i.id() == product_id)
    }

    /// Sum of `price * quantity` over all lines.
    pub fn total(&self) -> i64 {
        self.items
            .iter()
            .fold(0_i64, |acc, i| acc.saturating_add(i.line_total()))
    }

    /// Total item count (sum of quantities).
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Number of distinct lines.
    pub fn unique_item_count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Check that `quantity` of `product` can be sold.
pub fn check_availability(product: &Product, quantity: i64) -> CommerceResult<()> {
    if product.stock <= 0 {
        return Err(CommerceError::OutOfStock {
            name: product.name.clone(),
        });
    }
    if quantity > product.stock {
        return Err(CommerceError::InsufficientStock {
            name: product.name.clone(),
            requested: quantity,
            available: product.stock,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::product;

    fn now() -> DateTime<Utc> {
        Utc::now()
    }

    #[test]
    fn test_add_item() {
        let mut cart = Cart::new();
        cart.add_item(&product(1, 1000, 4.0, false), 2, now()).unwrap();

        assert_eq!(cart.item_count(), 2);
        assert_eq!(cart.unique_item_count(), 1);
        assert_eq!(cart.total(), 2000);
    }

    #[test]
    fn test_add_same_item_increases_quantity() {
        let mut cart = Cart::new();
        let p = product(1, 1000, 4.0, false);
        cart.add_item(&p, 1, now()).unwrap();
        cart.add_item(&p, 2, now()).unwrap();

        assert_eq!(cart.unique_item_count(), 1);
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn test_out_of_stock_rejected() {
        let mut cart = Cart::new();
        let mut p = product(1, 1000, 4.0, false);
        p.stock = 0;
        let result = cart.add_item(&p, 1, now());
        assert!(matches!(result, Err(CommerceError::OutOfStock { .. })));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_quantity_above_stock_rejected() {
        let mut cart = Cart::new();
        let result = cart.add_item(&product(1, 1000, 4.0, false), 11, now());
        assert!(matches!(
            result,
            Err(CommerceError::InsufficientStock { available: 10, .. })
        ));
    }

    #[test]
    fn test_invalid_quantity() {
        let mut cart = Cart::new();
        let result = cart.add_item(&product(1, 1000, 4.0, false), 0, now());
        assert!(matches!(result, Err(CommerceError::InvalidQuantity(0))));
    }

    #[test]
    fn test_set_quantity_clamps() {
        let mut cart = Cart::new();
        cart.add_item(&product(1, 1000, 4.0, false), 3, now()).unwrap();
        assert!(cart.set_quantity(ProductId(1), -4));
        assert_eq!(cart.item_count(), 1);
        assert!(!cart.set_quantity(ProductId(2), 5));
    }

    #[test]
    fn test_update_quantity_below_one_removes() {
        let mut cart = Cart::new();
        cart.add_item(&product(1, 1000, 4.0, false), 3, now()).unwrap();
        cart.update_quantity(ProductId(1), 5).unwrap();
        assert_eq!(cart.item_count(), 5);

        assert!(cart.update_quantity(ProductId(1), 50).is_err());
        cart.update_quantity(ProductId(1), 0).unwrap();
        assert!(cart.is_empty());
        assert!(matches!(
            cart.update_quantity(ProductId(1), 2),
            Err(CommerceError::ItemNotInCart(_))
        ));
    }

    #[test]
    fn test_remove_item() {
        let mut cart = Cart::new();
        cart.add_item(&product(1, 1000, 4.0, false), 1, now()).unwrap();
        assert!(cart.remove_item(ProductId(1)));
        assert!(!cart.remove_item(ProductId(1)));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_serialized_line_is_flat() {
        let mut cart = Cart::new();
        cart.add_item(&product(4, 1000, 4.0, false), 2, now()).unwrap();
        let json = serde_json::to_value(&cart).unwrap();
        let line = &json[0];
        assert_eq!(line["id"], 4);
        assert_eq!(line["quantity"], 2);
        assert!(line.get("addedAt").is_some());
        assert!(line.get("product").is_none());

        let back: Cart = serde_json::from_value(json).unwrap();
        assert_eq!(back, cart);
    }
}
