//! Product types and admin edit payloads.

use crate::ids::ProductId;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A product in the catalog.
///
/// Field names serialize in camelCase so persisted snapshots, cart lines and
/// wishlist entries share one shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Full description.
    pub description: String,
    /// Top-level category name.
    pub category: String,
    /// Subcategory name within `category`.
    pub subcategory: String,
    /// Stock keeping unit.
    pub sku: String,
    /// Selling price in the smallest currency unit.
    pub price: i64,
    /// Price before discount; only set when a discount applies.
    #[serde(default)]
    pub original_price: Option<i64>,
    /// Discount percentage (0-100).
    #[serde(default)]
    pub discount: u8,
    /// Units on hand. Admin adjustments may push this below zero.
    pub stock: i64,
    /// Average rating in [0.0, 5.0].
    pub rating: f64,
    /// Number of reviews.
    #[serde(default)]
    pub review_count: u32,
    /// Image URLs, first is the cover.
    #[serde(default)]
    pub images: Vec<String>,
    /// A sample of customer reviews.
    #[serde(default)]
    pub reviews: Vec<Review>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub best_selling: bool,
    #[serde(default)]
    pub new_arrival: bool,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Check if the product can be added to a cart.
    pub fn is_in_stock(&self) -> bool {
        self.stock > 0
    }

    /// Check if this product is on sale.
    pub fn is_on_sale(&self) -> bool {
        self.original_price
            .map(|original| original > self.price)
            .unwrap_or(false)
    }

    /// Amount saved per unit compared to the original price.
    pub fn savings_per_unit(&self) -> i64 {
        self.original_price
            .map(|original| (original - self.price).max(0))
            .unwrap_or(0)
    }

    /// Lowercased text matched by free-text search.
    pub fn searchable_text(&self) -> String {
        format!(
            "{} {} {} {} {}",
            self.name, self.description, self.category, self.subcategory, self.sku
        )
        .to_lowercase()
    }

    /// Cover image, if any.
    pub fn cover_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    /// Overwrite the fields present in `patch`.
    pub fn apply_patch(&mut self, patch: &ProductPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
        if let Some(category) = &patch.category {
            self.category = category.clone();
        }
        if let Some(subcategory) = &patch.subcategory {
            self.subcategory = subcategory.clone();
        }
        if let Some(sku) = &patch.sku {
            self.sku = sku.clone();
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(original_price) = patch.original_price {
            self.original_price = original_price;
        }
        if let Some(discount) = patch.discount {
            self.discount = discount;
        }
        if let Some(stock) = patch.stock {
            self.stock = stock;
        }
        if let Some(rating) = patch.rating {
            self.rating = rating;
        }
        if let Some(review_count) = patch.review_count {
            self.review_count = review_count;
        }
        if let Some(images) = &patch.images {
            self.images = images.clone();
        }
        if let Some(featured) = patch.featured {
            self.featured = featured;
        }
        if let Some(best_selling) = patch.best_selling {
            self.best_selling = best_selling;
        }
        if let Some(new_arrival) = patch.new_arrival {
            self.new_arrival = new_arrival;
        }
    }
}

/// A customer review attached to a product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: u32,
    pub user_name: String,
    /// Star rating, 1-5.
    pub rating: u8,
    pub comment: String,
    pub date: NaiveDate,
}

/// Fields supplied by an admin when creating a product.
///
/// The engine assigns the id, creation time and merchandising flags.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub category: String,
    pub subcategory: String,
    #[serde(default)]
    pub sku: String,
    pub price: i64,
    #[serde(default)]
    pub original_price: Option<i64>,
    #[serde(default)]
    pub discount: u8,
    #[serde(default)]
    pub stock: i64,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub review_count: u32,
    #[serde(default)]
    pub images: Vec<String>,
}

impl NewProduct {
    /// Turn the payload into a catalog entry.
    pub fn into_product(self, id: ProductId, created_at: DateTime<Utc>) -> Product {
        Product {
            id,
            name: self.name,
            description: self.description,
            category: self.category,
            subcategory: self.subcategory,
            sku: self.sku,
            price: self.price,
            original_price: self.original_price,
            discount: self.discount,
            stock: self.stock,
            rating: self.rating,
            review_count: self.review_count,
            images: self.images,
            reviews: Vec::new(),
            featured: false,
            best_selling: false,
            new_arrival: true,
            created_at,
        }
    }
}

/// Partial update for an existing product.
///
/// `original_price` is doubly optional: `Some(None)` clears the discount
/// reference price, `None` leaves it untouched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub sku: Option<String>,
    pub price: Option<i64>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub original_price: Option<Option<i64>>,
    pub discount: Option<u8>,
    pub stock: Option<i64>,
    pub rating: Option<f64>,
    pub review_count: Option<u32>,
    pub images: Option<Vec<String>>,
    pub featured: Option<bool>,
    pub best_selling: Option<bool>,
    pub new_arrival: Option<bool>,
}

/// Marks a field present even when its value is `null`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

impl ProductPatch {
    /// Check if the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        *self == ProductPatch::default()
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::product;
    use super::*;

    #[test]
    fn test_product_on_sale() {
        let mut p = product(1, 800, 4.0, false);
        assert!(!p.is_on_sale());
        assert_eq!(p.savings_per_unit(), 0);

        p.original_price = Some(1000);
        assert!(p.is_on_sale());
        assert_eq!(p.savings_per_unit(), 200);
    }

    #[test]
    fn test_searchable_text_includes_sku() {
        let p = product(3, 100, 4.0, false);
        let text = p.searchable_text();
        assert!(text.contains("tst-0003"));
        assert!(text.contains("laptops"));
    }

    #[test]
    fn test_apply_patch_overwrites_present_fields_only() {
        let mut p = product(1, 800, 4.0, false);
        p.original_price = Some(1000);

        let patch = ProductPatch {
            price: Some(750),
            stock: Some(3),
            ..Default::default()
        };
        p.apply_patch(&patch);

        assert_eq!(p.price, 750);
        assert_eq!(p.stock, 3);
        assert_eq!(p.original_price, Some(1000));
        assert_eq!(p.name, "Product 1");
    }

    #[test]
    fn test_apply_patch_clears_original_price() {
        let mut p = product(1, 800, 4.0, false);
        p.original_price = Some(1000);
        p.apply_patch(&ProductPatch {
            original_price: Some(None),
            ..Default::default()
        });
        assert_eq!(p.original_price, None);
    }

    #[test]
    fn test_new_product_flags() {
        let p = NewProduct {
            name: "Desk Lamp".to_string(),
            category: "Home & Living".to_string(),
            subcategory: "Lighting".to_string(),
            price: 1200,
            ..Default::default()
        }
        .into_product(ProductId(9), Utc::now());

        assert!(p.new_arrival);
        assert!(!p.featured);
        assert!(!p.best_selling);
        assert_eq!(p.id, ProductId(9));
    }

    #[test]
    fn test_product_json_shape() {
        let p = product(2, 500, 4.5, true);
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["reviewCount"], 0);
        assert_eq!(json["bestSelling"], false);
        assert!(json.get("createdAt").is_some());
        assert!(json["originalPrice"].is_null());
    }

    #[test]
    fn test_patch_null_original_price_clears() {
        let patch: ProductPatch = serde_json::from_str(r#"{"originalPrice": null}"#).unwrap();
        assert_eq!(patch.original_price, Some(None));
        assert!(!patch.is_empty());

        let untouched: ProductPatch = serde_json::from_str(r#"{"price": 900}"#).unwrap();
        assert_eq!(untouched.original_price, None);

        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(json["originalPrice"], serde_json::Value::Null);
        assert_eq!(serde_json::from_value::<ProductPatch>(json).unwrap(), patch);
        assert!(serde_json::to_value(&untouched)
            .unwrap()
            .get("originalPrice")
            .is_none());

        let mut p = product(1, 800, 4.0, false);
        p.original_price = Some(1000);
        p.apply_patch(&patch);
        assert_eq!(p.original_price, None);
    }
}
