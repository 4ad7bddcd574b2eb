//! Saved-for-later products.

use crate::catalog::Product;
use crate::ids::ProductId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A wishlisted product snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WishlistEntry {
    #[serde(flatten)]
    pub product: Product,
    pub added_at: DateTime<Utc>,
}

/// A wishlist without duplicates.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(transparent)]
pub struct Wishlist {
    entries: Vec<WishlistEntry>,
}

impl Wishlist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `product` unless already present. Returns whether it was added.
    pub fn add(&mut self, product: &Product, now: DateTime<Utc>) -> bool {
        if self.contains(product.id) {
            return false;
        }
        self.entries.push(WishlistEntry {
            product: product.clone(),
            added_at: now,
        });
        true
    }

    /// Remove a product. Returns whether it was present.
    pub fn remove(&mut self, product_id: ProductId) -> bool {
        let len_before = self.entries.len();
        self.entries.retain(|e| e.product.id != product_id);
        self.entries.len() < len_before
    }

    /// Add or remove `product`. Returns whether it is now wishlisted.
    pub fn toggle(&mut self, product: &Product, now: DateTime<Utc>) -> bool {
        if self.remove(product.id) {
            false
        } else {
            self.add(product, now)
        }
    }

    pub fn contains(&self, product_id: ProductId) -> bool {
        self.entries.iter().any(|e| e.product.id == product_id)
    }

    pub fn entries(&self) -> &[WishlistEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::product;

    #[test]
    fn test_no_duplicates() {
        let mut list = Wishlist::new();
        let p = product(1, 100, 4.0, false);
        assert!(list.add(&p, Utc::now()));
        assert!(!list.add(&p, Utc::now()));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_toggle() {
        let mut list = Wishlist::new();
        let p = product(1, 100, 4.0, false);
        assert!(list.toggle(&p, Utc::now()));
        assert!(list.contains(ProductId(1)));
        assert!(!list.toggle(&p, Utc::now()));
        assert!(list.is_empty());
    }

    #[test]
    fn test_remove_unknown() {
        let mut list = Wishlist::new();
        assert!(!list.remove(ProductId(3)));
    }
}
