//! Shopping cart commands.

use anyhow::{anyhow, Result};
use serde_json::json;
use storefront_commerce::cart::{check_availability, Cart, CartSummary};
use storefront_commerce::display::format_currency;
use storefront_commerce::{Currency, ProductId};

use super::{find_product, CartArgs, CartCommand};
use crate::context::Context;

/// Run the cart command.
pub fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    match args.command.unwrap_or(CartCommand::Show { coupon: None }) {
        CartCommand::Show { coupon } => show(coupon.as_deref(), ctx),
        CartCommand::Add { id, quantity } => add(id, quantity, ctx),
        CartCommand::Remove { id } => remove(id, ctx),
        CartCommand::Qty { id, quantity } => set_quantity(id, quantity, ctx),
        CartCommand::Clear => clear(ctx),
    }
}

fn show(coupon: Option<&str>, ctx: &Context) -> Result<()> {
    let shop = ctx.open_storefront()?;
    let checkout = ctx.checkout()?;
    let cart = shop.storage.cart();
    let summary = checkout.summarize(&cart, coupon)?;

    if ctx.output.is_json() {
        ctx.output.json(&json!({ "items": cart, "summary": summary }));
        return Ok(());
    }

    ctx.output.header("Shopping Cart");
    if cart.is_empty() {
        ctx.output.info("Your cart is empty.");
        return Ok(());
    }

    print_lines(&cart, checkout.currency, ctx);
    print_summary(&summary, ctx);
    Ok(())
}

fn print_lines(cart: &Cart, currency: Currency, ctx: &Context) {
    let widths = [5, 40, 14, 5, 14];
    ctx.output
        .table_row(&["ID", "NAME", "PRICE", "QTY", "TOTAL"], &widths);
    for item in cart.items() {
        let id = item.id().to_string();
        let name = storefront_commerce::display::truncate_text(&item.product.name, 40);
        let price = format_currency(item.product.price, currency);
        let qty = item.quantity.to_string();
        let total = format_currency(item.line_total(), currency);
        ctx.output.table_row(&[&id[..], &name[..], &price[..], &qty[..], &total[..]], &widths);
    }
}

pub(crate) fn print_summary(summary: &CartSummary, ctx: &Context) {
    ctx.output.info("");
    ctx.output.kv("Items", &summary.item_count.to_string());
    ctx.output.kv("Subtotal", &summary.subtotal.display());
    if summary.has_savings() {
        ctx.output.kv("You save", &summary.savings.display());
    }
    if let Some(code) = &summary.coupon_code {
        ctx.output
            .kv(&format!("Coupon {}", code), &format!("-{}", summary.coupon_discount.display()));
    }
    let shipping = if summary.is_free_shipping() {
        "FREE".to_string()
    } else {
        summary.shipping.display()
    };
    ctx.output.kv("Shipping", &shipping);
    ctx.output.kv("Total", &summary.total.display());
    if let Some(remaining) = &summary.free_shipping_remaining {
        ctx.output.info(&format!(
            "Add {} more for free shipping.",
            remaining.display()
        ));
    }
}

fn add(id: u64, quantity: i64, ctx: &Context) -> Result<()> {
    let shop = ctx.open_storefront()?;
    let product = find_product(&shop.engine, id)?;
    let update = shop.storage.add_to_cart(product, quantity)?;

    if ctx.output.is_json() {
        ctx.output.json(&update);
        return Ok(());
    }
    ctx.output.success(&format!(
        "Added {} x {} to cart ({} items)",
        quantity, product.name, update.count
    ));
    Ok(())
}

fn remove(id: u64, ctx: &Context) -> Result<()> {
    let shop = ctx.open_storefront()?;
    if shop.storage.cart().get_item(ProductId(id)).is_none() {
        return Err(anyhow!("Product {} is not in the cart", id));
    }
    let update = shop.storage.remove_from_cart(ProductId(id))?;

    if ctx.output.is_json() {
        ctx.output.json(&update);
        return Ok(());
    }
    ctx.output
        .success(&format!("Removed product {} ({} items left)", id, update.count));
    Ok(())
}

fn set_quantity(id: u64, quantity: i64, ctx: &Context) -> Result<()> {
    let shop = ctx.open_storefront()?;
    if shop.storage.cart().get_item(ProductId(id)).is_none() {
        return Err(anyhow!("Product {} is not in the cart", id));
    }
    let product = find_product(&shop.engine, id)?;
    check_availability(product, quantity.max(1))?;
    let update = shop.storage.update_cart_item_quantity(ProductId(id), quantity)?;

    if ctx.output.is_json() {
        ctx.output.json(&update);
        return Ok(());
    }
    ctx.output.success(&format!(
        "Quantity of {} set to {}",
        product.name,
        quantity.max(1)
    ));
    Ok(())
}

fn clear(ctx: &Context) -> Result<()> {
    let shop = ctx.open_storefront()?;
    if shop.storage.cart().is_empty() {
        ctx.output.info("Cart is already empty.");
        return Ok(());
    }
    if !ctx.confirm("Remove every item from the cart?")? {
        ctx.output.warn("Cart left unchanged");
        return Ok(());
    }
    shop.storage.clear_cart()?;
    ctx.output.success("Cart cleared");
    Ok(())
}
