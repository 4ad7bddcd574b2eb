//! Catalog filter state.

use crate::catalog::Product;
use serde::{Deserialize, Serialize};

/// The active catalog filters.
///
/// Every field participates in each recompute: a product is kept only when it
/// satisfies all of them at once.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    /// Exact category match.
    pub category: Option<String>,
    /// Exact subcategory match.
    pub subcategory: Option<String>,
    /// Inclusive lower price bound.
    pub price_min: i64,
    /// Inclusive upper price bound; `None` is unbounded.
    pub price_max: Option<i64>,
    /// Case-insensitive substring query; empty means no search.
    pub search: String,
    /// Inclusive minimum rating.
    pub rating: f64,
    /// Exclude products without stock.
    pub in_stock: bool,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            category: None,
            subcategory: None,
            price_min: 0,
            price_max: None,
            search: String::new(),
            rating: 0.0,
            in_stock: false,
        }
    }
}

impl FilterState {
    /// Create an empty filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to a category and optional subcategory.
    pub fn with_category(mut self, category: impl Into<String>, subcategory: Option<String>) -> Self {
        self.category = Some(category.into());
        self.subcategory = subcategory;
        self
    }

    /// Restrict to an inclusive price range.
    pub fn with_price_range(mut self, min: i64, max: Option<i64>) -> Self {
        self.price_min = min;
        self.price_max = max;
        self
    }

    /// Set the search query.
    pub fn with_search(mut self, query: impl Into<String>) -> Self {
        self.set_search(&query.into());
        self
    }

    /// Require a minimum rating.
    pub fn with_min_rating(mut self, rating: f64) -> Self {
        self.rating = rating;
        self
    }

    /// Only keep products with stock.
    pub fn in_stock_only(mut self) -> Self {
        self.in_stock = true;
        self
    }

    /// Set the search term; whitespace-only input clears it.
    pub fn set_search(&mut self, query: &str) {
        if query.trim().is_empty() {
            self.search.clear();
        } else {
            self.search = query.to_string();
        }
    }

    /// Check if no filter is active.
    pub fn is_default(&self) -> bool {
        *self == FilterState::default()
    }

    /// Check whether `product` satisfies every active filter.
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(category) = &self.category {
            if &product.category != category {
                return false;
            }
        }

        if let Some(subcategory) = &self.subcategory {
            if &product.subcategory != subcategory {
                return false;
            }
        }

        if product.price < self.price_min {
            return false;
        }
        if let Some(max) = self.price_max {
            if product.price > max {
                return false;
            }
        }

        if product.rating < self.rating {
            return false;
        }

        if self.in_stock && product.stock <= 0 {
            return false;
        }

        if !self.search.is_empty() {
            let query = self.search.to_lowercase();
            if !product.searchable_text().contains(&query) {
                return false;
            }
        }

        true
    }
}
