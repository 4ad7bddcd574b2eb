//! Catalog listing.

use anyhow::Result;
use storefront_commerce::search::FilterState;

use super::ProductsArgs;
use crate::context::Context;

/// Build the filter described by the command line.
fn filter_from_args(args: &ProductsArgs) -> FilterState {
    let mut filter = FilterState::new();
    if let Some(category) = &args.category {
        filter = filter.with_category(category.clone(), args.subcategory.clone());
    }
    if args.min_price.is_some() || args.max_price.is_some() {
        filter = filter.with_price_range(args.min_price.unwrap_or(0), args.max_price);
    }
    if let Some(query) = &args.search {
        filter = filter.with_search(query.clone());
    }
    if let Some(rating) = args.min_rating {
        filter = filter.with_min_rating(rating);
    }
    if args.in_stock {
        filter = filter.in_stock_only();
    }
    filter
}

/// Run the products command.
pub fn run(args: ProductsArgs, ctx: &Context) -> Result<()> {
    let currency = ctx.config.currency()?;
    let mut shop = ctx.open_storefront()?;

    let filter = filter_from_args(&args);
    shop.engine.apply_filter(filter);
    shop.engine.sort(args.sort);

    let page_size = args.page_size.unwrap_or(ctx.config.catalog.page_size);
    let page = shop.engine.get_page(args.page, page_size);

    if ctx.output.is_json() {
        ctx.output.json(&page);
        return Ok(());
    }

    ctx.output.header(&format!(
        "Products ({} results, {})",
        page.total,
        args.sort.display_name()
    ));

    if page.is_empty() {
        if page.total == 0 {
            ctx.output.info("No products match these filters.");
        } else {
            ctx.output
                .warn(&format!("Page {} is past the last page ({}).", args.page, page.total_pages));
        }
        return Ok(());
    }

    ctx.output.product_header();
    for product in &page.items {
        ctx.output.product_row(product, currency);
    }

    ctx.output.info("");
    ctx.output.info(&format!(
        "Showing {}-{} of {} (page {} of {})",
        page.start_item(),
        page.end_item(),
        page.total,
        page.page_number,
        page.total_pages
    ));
    if page.total_pages > 1 {
        let pages: Vec<String> = page
            .page_numbers(7)
            .into_iter()
            .map(|n| {
                if n == page.page_number {
                    format!("[{}]", n)
                } else {
                    n.to_string()
                }
            })
            .collect();
        ctx.output.kv("Pages", &pages.join(" "));
    }

    Ok(())
}
