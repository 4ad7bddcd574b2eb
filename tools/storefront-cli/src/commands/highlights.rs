//! Home page highlight sections.

use anyhow::Result;
use serde_json::json;

use super::HighlightsArgs;
use crate::context::Context;

/// Run the highlights command.
pub fn run(args: HighlightsArgs, ctx: &Context) -> Result<()> {
    let currency = ctx.config.currency()?;
    let shop = ctx.open_storefront()?;
    let limit = args.limit.unwrap_or(ctx.config.catalog.highlight_limit);

    let sections = [
        ("Featured", shop.engine.get_featured(limit)),
        ("Best Selling", shop.engine.get_best_selling(limit)),
        ("New Arrivals", shop.engine.get_new_arrivals(limit)),
    ];

    if ctx.output.is_json() {
        let [featured, best_selling, new_arrivals] = &sections;
        ctx.output.json(&json!({
            "featured": featured.1,
            "bestSelling": best_selling.1,
            "newArrivals": new_arrivals.1,
        }));
        return Ok(());
    }

    for (title, products) in &sections {
        ctx.output.header(title);
        if products.is_empty() {
            ctx.output.info("Nothing here yet.");
            continue;
        }
        ctx.output.product_header();
        for product in products {
            ctx.output.product_row(product, currency);
        }
    }

    Ok(())
}
