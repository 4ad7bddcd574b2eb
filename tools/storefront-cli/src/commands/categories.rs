//! Category taxonomy listing.

use std::collections::HashMap;

use anyhow::{anyhow, Result};
use serde::Serialize;
use storefront_commerce::catalog::{find_category, Category, Product};

use super::CategoriesArgs;
use crate::context::Context;

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
struct CategoryCount {
    name: String,
    products: usize,
    subcategories: Vec<(String, usize)>,
}

fn count_products(categories: &[Category], products: &[Product]) -> Vec<CategoryCount> {
    let mut counts: HashMap<(&str, &str), usize> = HashMap::new();
    for p in products {
        *counts
            .entry((p.category.as_str(), p.subcategory.as_str()))
            .or_default() += 1;
    }

    categories
        .iter()
        .map(|c| {
            let subcategories: Vec<(String, usize)> = c
                .subcategories
                .iter()
                .map(|s| {
                    let n = counts.get(&(c.name.as_str(), s.as_str())).copied().unwrap_or(0);
                    (s.clone(), n)
                })
                .collect();
            let products = products.iter().filter(|p| p.category == c.name).count();
            CategoryCount {
                name: c.name.clone(),
                products,
                subcategories,
            }
        })
        .collect()
}

/// Run the categories command.
pub fn run(args: CategoriesArgs, ctx: &Context) -> Result<()> {
    let shop = ctx.open_storefront()?;
    let categories = shop.engine.categories();

    let selected: Vec<Category> = match &args.category {
        Some(name) => vec![find_category(categories, name)
            .cloned()
            .ok_or_else(|| anyhow!("No category named {}", name))?],
        None => categories.to_vec(),
    };
    let counts = count_products(&selected, shop.engine.all_products());

    if ctx.output.is_json() {
        ctx.output.json(&counts);
        return Ok(());
    }

    ctx.output.header("Categories");
    for category in &counts {
        ctx.output.info(&format!("{} ({})", category.name, category.products));
        for (name, n) in &category.subcategories {
            ctx.output.list_item(&format!("{} ({})", name, n));
        }
    }

    Ok(())
}
