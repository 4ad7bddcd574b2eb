//! Category taxonomy.

use serde::{Deserialize, Serialize};

/// A top-level category and its subcategories.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    /// Unique category identifier.
    pub id: u32,
    /// Category name, matched exactly by the category filter.
    pub name: String,
    /// Subcategory names in display order.
    pub subcategories: Vec<String>,
}

impl Category {
    /// Create a category from string slices.
    pub fn new(id: u32, name: impl Into<String>, subcategories: &[&str]) -> Self {
        Self {
            id,
            name: name.into(),
            subcategories: subcategories.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Check if `name` is one of this category's subcategories.
    pub fn has_subcategory(&self, name: &str) -> bool {
        self.subcategories.iter().any(|s| s == name)
    }
}

/// Find a category by exact name.
pub fn find_category<'a>(categories: &'a [Category], name: &str) -> Option<&'a Category> {
    categories.iter().find(|c| c.name == name)
}

/// The storefront's built-in taxonomy: eight categories of six subcategories.
///
/// Subcategory names are not unique across categories ("Electronics" appears
/// under Automotive too).
pub fn default_taxonomy() -> Vec<Category> {
    vec![
        Category::new(
            1,
            "Electronics",
            &["Smartphones", "Laptops", "Tablets", "Headphones", "Cameras", "Smartwatches"],
        ),
        Category::new(
            2,
            "Fashion",
            &["Men's Clothing", "Women's Clothing", "Shoes", "Accessories", "Jewelry", "Bags"],
        ),
        Category::new(
            3,
            "Home & Living",
            &["Furniture", "Decor", "Kitchen", "Bedding", "Lighting", "Storage"],
        ),
        Category::new(
            4,
            "Beauty & Health",
            &["Skincare", "Makeup", "Fragrances", "Haircare", "Supplements", "Personal Care"],
        ),
        Category::new(
            5,
            "Sports & Outdoors",
            &["Fitness Equipment", "Sports Gear", "Camping", "Cycling", "Swimming", "Yoga"],
        ),
        Category::new(
            6,
            "Books & Media",
            &["Fiction", "Non-Fiction", "Comics", "Music", "Movies", "Magazines"],
        ),
        Category::new(
            7,
            "Toys & Games",
            &["Action Figures", "Board Games", "Puzzles", "Educational Toys", "Video Games", "Outdoor Toys"],
        ),
        Category::new(
            8,
            "Automotive",
            &["Car Accessories", "Tools", "Car Care", "Electronics", "Parts", "Safety"],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_taxonomy_shape() {
        let taxonomy = default_taxonomy();
        assert_eq!(taxonomy.len(), 8);
        assert!(taxonomy.iter().all(|c| c.subcategories.len() == 6));
    }

    #[test]
    fn test_find_category() {
        let taxonomy = default_taxonomy();
        let fashion = find_category(&taxonomy, "Fashion").unwrap();
        assert!(fashion.has_subcategory("Shoes"));
        assert!(!fashion.has_subcategory("Laptops"));
        assert!(find_category(&taxonomy, "fashion").is_none());
    }
}
