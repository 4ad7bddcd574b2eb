//! Wishlist commands.

use anyhow::{anyhow, Result};
use chrono::Utc;
use storefront_commerce::display::relative_date;
use storefront_commerce::ProductId;

use super::{find_product, WishlistArgs, WishlistCommand};
use crate::context::Context;
use crate::output::price_label;

/// Run the wishlist command.
pub fn run(args: WishlistArgs, ctx: &Context) -> Result<()> {
    match args.command.unwrap_or(WishlistCommand::List) {
        WishlistCommand::List => list(ctx),
        WishlistCommand::Add { id } => add(id, ctx),
        WishlistCommand::Remove { id } => remove(id, ctx),
        WishlistCommand::Toggle { id } => toggle(id, ctx),
    }
}

fn list(ctx: &Context) -> Result<()> {
    let currency = ctx.config.currency()?;
    let shop = ctx.open_storefront()?;
    let wishlist = shop.storage.wishlist();

    if ctx.output.is_json() {
        ctx.output.json(&wishlist);
        return Ok(());
    }

    ctx.output.header(&format!("Wishlist ({})", wishlist.len()));
    if wishlist.is_empty() {
        ctx.output.info("No saved products.");
        return Ok(());
    }
    let now = Utc::now();
    for entry in wishlist.entries() {
        ctx.output.list_item(&format!(
            "#{} {} - {} (saved {})",
            entry.product.id,
            entry.product.name,
            price_label(&entry.product, currency),
            relative_date(entry.added_at, now).to_lowercase()
        ));
    }
    Ok(())
}

fn add(id: u64, ctx: &Context) -> Result<()> {
    let shop = ctx.open_storefront()?;
    let product = find_product(&shop.engine, id)?;
    if shop.storage.is_in_wishlist(product.id) {
        ctx.output.info(&format!("{} is already in the wishlist", product.name));
        return Ok(());
    }
    shop.storage.add_to_wishlist(product)?;
    ctx.output.success(&format!("Saved {} to the wishlist", product.name));
    Ok(())
}

fn remove(id: u64, ctx: &Context) -> Result<()> {
    let shop = ctx.open_storefront()?;
    if !shop.storage.is_in_wishlist(ProductId(id)) {
        return Err(anyhow!("Product {} is not in the wishlist", id));
    }
    shop.storage.remove_from_wishlist(ProductId(id))?;
    ctx.output.success(&format!("Removed product {} from the wishlist", id));
    Ok(())
}

fn toggle(id: u64, ctx: &Context) -> Result<()> {
    let shop = ctx.open_storefront()?;
    let product = find_product(&shop.engine, id)?;
    let added = shop.storage.toggle_wishlist(product)?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "id": product.id, "inWishlist": added }));
        return Ok(());
    }
    if added {
        ctx.output.success(&format!("♥ Saved {}", product.name));
    } else {
        ctx.output.success(&format!("Removed {}", product.name));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::test_support::context;

    #[test]
    fn test_wishlist_flow() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(dir.path());

        add(1, &ctx).unwrap();
        add(1, &ctx).unwrap();
        toggle(2, &ctx).unwrap();
        list(&ctx).unwrap();
        {
            let shop = ctx.open_storefront().unwrap();
            assert_eq!(shop.storage.wishlist().len(), 2);
        }

        toggle(2, &ctx).unwrap();
        remove(1, &ctx).unwrap();
        assert!(remove(1, &ctx).is_err());
        assert!(ctx.open_storefront().unwrap().storage.wishlist().is_empty());
    }
}
