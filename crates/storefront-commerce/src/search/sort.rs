//! Sort keys for the filtered catalog view.

use crate::catalog::Product;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Sort options for the catalog view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Featured products first, then by rating.
    #[default]
    Featured,
    /// Sort by price, low to high.
    PriceLow,
    /// Sort by price, high to low.
    PriceHigh,
    /// Sort by highest rated.
    Rating,
    /// Sort by newest first.
    Newest,
    /// Sort by review count.
    Popular,
}

impl SortKey {
    /// All keys in menu order.
    pub const ALL: [SortKey; 6] = [
        SortKey::Featured,
        SortKey::PriceLow,
        SortKey::PriceHigh,
        SortKey::Rating,
        SortKey::Newest,
        SortKey::Popular,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Featured => "featured",
            SortKey::PriceLow => "price-low",
            SortKey::PriceHigh => "price-high",
            SortKey::Rating => "rating",
            SortKey::Newest => "newest",
            SortKey::Popular => "popular",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SortKey::Featured => "Featured",
            SortKey::PriceLow => "Price: Low to High",
            SortKey::PriceHigh => "Price: High to Low",
            SortKey::Rating => "Highest Rated",
            SortKey::Newest => "Newest",
            SortKey::Popular => "Most Popular",
        }
    }

    /// Parse a key, falling back to `Featured` for anything unknown.
    pub fn parse_lenient(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }

    /// Compare two products under this key.
    ///
    /// Used with a stable sort, so equal keys keep their prior relative order.
    pub fn compare(&self, a: &Product, b: &Product) -> Ordering {
        match self {
            SortKey::PriceLow => a.price.cmp(&b.price),
            SortKey::PriceHigh => b.price.cmp(&a.price),
            SortKey::Rating => b.rating.total_cmp(&a.rating),
            SortKey::Newest => b.created_at.cmp(&a.created_at),
            SortKey::Popular => b.review_count.cmp(&a.review_count),
            SortKey::Featured => b
                .featured
                .cmp(&a.featured)
                .then_with(|| b.rating.total_cmp(&a.rating)),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for an unrecognized sort key.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort key: {0}")]
pub struct UnknownSortKey(pub String);

impl FromStr for SortKey {
    type Err = UnknownSortKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| UnknownSortKey(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::product;

    #[test]
    fn test_parse_round_trip() {
        for key in SortKey::ALL {
            assert_eq!(key.as_str().parse::<SortKey>().unwrap(), key);
        }
        assert!("cheapest".parse::<SortKey>().is_err());
        assert_eq!(SortKey::parse_lenient("cheapest"), SortKey::Featured);
    }

    #[test]
    fn test_serde_uses_kebab_case() {
        let json = serde_json::to_string(&SortKey::PriceHigh).unwrap();
        assert_eq!(json, r#""price-high""#);
    }

    #[test]
    fn test_featured_before_rating() {
        let featured = product(1, 100, 4.5, true);
        let plain = product(2, 50, 4.8, false);
        assert_eq!(SortKey::Featured.compare(&featured, &plain), Ordering::Less);
        assert_eq!(SortKey::PriceLow.compare(&featured, &plain), Ordering::Greater);
    }

    #[test]
    fn test_newest_and_popular_descend() {
        let older = product(1, 100, 4.0, false);
        let mut newer = product(2, 100, 4.0, false);
        newer.review_count = 10;
        assert_eq!(SortKey::Newest.compare(&newer, &older), Ordering::Less);
        assert_eq!(SortKey::Popular.compare(&newer, &older), Ordering::Less);
        assert_eq!(SortKey::Rating.compare(&newer, &older), Ordering::Equal);
    }
}
