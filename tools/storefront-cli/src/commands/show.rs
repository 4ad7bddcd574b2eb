//! Product detail page.

use anyhow::Result;
use chrono::Utc;
use serde::Serialize;
use storefront_commerce::catalog::Product;
use storefront_commerce::display::{relative_date, stock_status};

use super::{find_product, ShowArgs};
use crate::context::Context;
use crate::output::{price_label, stars, stock_badge};

const REVIEWS_SHOWN: usize = 3;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProductDetail<'a> {
    product: &'a Product,
    in_cart: i64,
    in_wishlist: bool,
    related: Vec<&'a Product>,
}

/// Run the show command.
pub fn run(args: ShowArgs, ctx: &Context) -> Result<()> {
    let currency = ctx.config.currency()?;
    let shop = ctx.open_storefront()?;

    let product = find_product(&shop.engine, args.id)?;
    let limit = args.related.unwrap_or(ctx.config.catalog.related_limit);
    let related = shop.engine.get_related(product.id, limit);
    let in_cart = shop
        .storage
        .cart()
        .get_item(product.id)
        .map(|item| item.quantity)
        .unwrap_or(0);
    let in_wishlist = shop.storage.is_in_wishlist(product.id);

    if ctx.output.is_json() {
        ctx.output.json(&ProductDetail {
            product,
            in_cart,
            in_wishlist,
            related,
        });
        return Ok(());
    }

    ctx.output.header(&product.name);
    ctx.output.kv("ID", &product.id.to_string());
    if !product.sku.is_empty() {
        ctx.output.kv("SKU", &product.sku);
    }
    ctx.output
        .kv("Category", &format!("{} › {}", product.category, product.subcategory));
    ctx.output.kv("Price", &price_label(product, currency));
    ctx.output.kv(
        "Rating",
        &format!("{} ({} reviews)", stars(product.rating), product.review_count),
    );
    ctx.output.kv("Availability", &stock_badge(stock_status(product.stock)));
    ctx.output.kv("Added", &relative_date(product.created_at, Utc::now()));
    if in_cart > 0 {
        ctx.output.kv("In cart", &in_cart.to_string());
    }
    if in_wishlist {
        ctx.output.kv("Wishlist", "♥ saved");
    }

    if !product.description.is_empty() {
        ctx.output.info("");
        ctx.output.line(&product.description);
    }

    if !product.reviews.is_empty() {
        ctx.output.header("Reviews");
        for review in product.reviews.iter().take(REVIEWS_SHOWN) {
            ctx.output.list_item(&format!(
                "{} {} ({}): {}",
                stars(f64::from(review.rating)),
                review.user_name,
                review.date.format("%b %-d, %Y"),
                review.comment
            ));
        }
    }

    if !related.is_empty() {
        ctx.output.header("Related products");
        ctx.output.product_header();
        for p in related {
            ctx.output.product_row(p, currency);
        }
    }

    Ok(())
}
