//! Synthetic catalog generation.
//!
//! Produces a few hundred to a thousand-odd plausible products across the
//! built-in taxonomy. A given seed always yields the same catalog apart from
//! timestamps, which are relative to `now`.

use crate::catalog::{default_taxonomy, Category, Product, Review};
use crate::ids::ProductId;
use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Products and taxonomy handed to the catalog engine at startup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct CatalogData {
    pub products: Vec<Product>,
    pub categories: Vec<Category>,
}

const ADJECTIVES: &[&str] = &[
    "Amazing", "Excellent", "Fantastic", "Outstanding", "Superior", "Quality", "Deluxe",
];

const REVIEW_TEMPLATES: &[&str] = &[
    "Great product! Exactly what I needed.",
    "Very satisfied with this purchase. Highly recommended!",
    "Good quality for the price.",
    "Fast delivery and excellent product.",
    "Love it! Will buy again.",
    "Perfect! Exceeded my expectations.",
    "Decent product, does the job.",
    "Nice quality and good value.",
    "Happy with my purchase.",
    "Would recommend to friends and family.",
];

const REVIEWER_NAMES: &[&str] = &[
    "Ahmed", "Fatima", "Rahim", "Ayesha", "Karim", "Nadia", "Hasan", "Sara", "Tariq", "Zainab",
];

fn prefixes(category: &str) -> &'static [&'static str] {
    match category {
        "Electronics" => &["Premium", "Pro", "Ultra", "Smart", "Advanced", "Digital", "Wireless"],
        "Fashion" => &["Stylish", "Premium", "Designer", "Elegant", "Trendy", "Classic", "Modern"],
        "Home & Living" => &["Luxury", "Modern", "Classic", "Elegant", "Comfortable", "Stylish", "Premium"],
        "Beauty & Health" => &["Natural", "Organic", "Professional", "Premium", "Advanced", "Botanical", "Clinical"],
        "Sports & Outdoors" => &["Pro", "Elite", "Advanced", "Professional", "Performance", "Dynamic", "Ultimate"],
        "Books & Media" => &["Bestselling", "Popular", "Classic", "Contemporary", "Acclaimed", "Award-winning"],
        "Toys & Games" => &["Educational", "Interactive", "Fun", "Creative", "Exciting", "Entertaining"],
        "Automotive" => &["Professional", "Heavy-Duty", "Premium", "Advanced", "Reliable", "Durable"],
        _ => &["Classic"],
    }
}

/// Generate a catalog over the built-in taxonomy.
pub fn generate_catalog(seed: u64) -> CatalogData {
    generate_catalog_at(seed, Utc::now())
}

/// Generate a catalog with timestamps relative to `now`.
pub fn generate_catalog_at(seed: u64, now: DateTime<Utc>) -> CatalogData {
    let mut rng = StdRng::seed_from_u64(seed);
    let categories = default_taxonomy();
    let mut products = Vec::new();
    let mut next_id = ProductId(1);

    for category in &categories {
        for subcategory in &category.subcategories {
            let count = rng.gen_range(20..=25);
            for _ in 0..count {
                products.push(generate_product(&mut rng, next_id, category, subcategory, now));
                next_id = next_id.next();
            }
        }
    }

    tracing::debug!(seed, products = products.len(), "generated catalog");
    CatalogData {
        products,
        categories,
    }
}

fn generate_product(
    rng: &mut StdRng,
    id: ProductId,
    category: &Category,
    subcategory: &str,
    now: DateTime<Utc>,
) -> Product {
    let prefix = pick(rng, prefixes(&category.name));
    let adjective = pick(rng, ADJECTIVES);
    let label: String = subcategory
        .chars()
        .filter(|c| c.is_ascii_alphabetic() || *c == ' ')
        .collect();
    let name = format!("{} {} {} {}", prefix, adjective, label, rng.gen_range(100..=999));

    let base_price: i64 = rng.gen_range(500..=50_000);
    let discount: u8 = rng.gen_range(0..=50);
    let price = base_price - (base_price as f64 * discount as f64 / 100.0).round() as i64;

    let review_count: u32 = rng.gen_range(5..=150);
    let reviews = generate_reviews(rng, review_count.min(5), now);
    let n = id.get();

    Product {
        id,
        description: format!(
            "Experience the excellence of our {}. This premium product from the {} category \
             offers outstanding quality and performance. Perfect for anyone looking for \
             reliability and style.",
            name.to_lowercase(),
            subcategory
        ),
        name,
        category: category.name.clone(),
        subcategory: subcategory.to_string(),
        sku: generate_sku(rng),
        price,
        original_price: (discount > 0).then_some(base_price),
        discount,
        stock: rng.gen_range(0..=200),
        rating: rng.gen_range(30..=50) as f64 / 10.0,
        review_count,
        images: vec![
            format!("https://picsum.photos/seed/{}/600/600", n),
            format!("https://picsum.photos/seed/{}/600/600", n + 1000),
            format!("https://picsum.photos/seed/{}/600/600", n + 2000),
        ],
        reviews,
        featured: rng.gen_range(1..=100) > 90,
        best_selling: rng.gen_range(1..=100) > 85,
        new_arrival: rng.gen_range(1..=100) > 80,
        created_at: now - Duration::days(rng.gen_range(0..=365)),
    }
}

fn generate_reviews(rng: &mut StdRng, count: u32, now: DateTime<Utc>) -> Vec<Review> {
    (1..=count)
        .map(|id| Review {
            id,
            user_name: pick(rng, REVIEWER_NAMES).to_string(),
            rating: rng.gen_range(3..=5),
            comment: pick(rng, REVIEW_TEMPLATES).to_string(),
            date: (now - Duration::days(rng.gen_range(0..=90))).date_naive(),
        })
        .collect()
}

fn generate_sku(rng: &mut StdRng) -> String {
    let letters: String = (0..3)
        .map(|_| char::from(b'A' + rng.gen_range(0..26u8)))
        .collect();
    format!("{}-{}", letters, rng.gen_range(1000..=9999))
}

fn pick<'a>(rng: &mut StdRng, items: &[&'a str]) -> &'a str {
    items.choose(rng).copied().unwrap_or_default()
}
