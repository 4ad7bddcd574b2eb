//! Order commands.

use anyhow::{anyhow, Context as _, Result};
use chrono::Utc;
use storefront_commerce::checkout::{Customer, Invoice, Order, OrderStatus};
use storefront_commerce::display::{format_currency, format_date, relative_date};
use storefront_commerce::Currency;

use super::{CustomerArgs, OrderArgs, OrderCommand};
use crate::context::Context;
use crate::output::status_badge;

/// Run the order command.
pub fn run(args: OrderArgs, ctx: &Context) -> Result<()> {
    match args.command {
        OrderCommand::Place { customer, coupon } => place(customer, coupon.as_deref(), ctx),
        OrderCommand::List { status } => list(status, ctx),
        OrderCommand::Show { id } => show(&id, ctx),
        OrderCommand::Status { id, status } => set_status(&id, status, ctx),
        OrderCommand::Cancel { id } => cancel(&id, ctx),
        OrderCommand::Invoice { id, output } => invoice(&id, output.as_deref(), ctx),
    }
}

impl From<CustomerArgs> for Customer {
    fn from(args: CustomerArgs) -> Self {
        Customer {
            first_name: args.first_name,
            last_name: args.last_name,
            email: args.email,
            phone: args.phone,
            address: args.address,
            city: args.city,
            district: args.district,
            postal_code: args.postal_code,
        }
    }
}

fn find_order(order: Option<Order>, id: &str) -> Result<Order> {
    order.ok_or_else(|| anyhow!("No order with id {}", id))
}

fn place(customer: CustomerArgs, coupon: Option<&str>, ctx: &Context) -> Result<()> {
    let mut shop = ctx.open_storefront()?;
    let checkout = ctx.checkout()?;

    let order = checkout.place_order(&shop.storage, &mut shop.engine, customer.into(), coupon)?;

    if ctx.output.is_json() {
        ctx.output.json(&order);
        return Ok(());
    }
    ctx.output.success(&format!("Order {} placed", order.id));
    print_order(&order, checkout.currency, ctx);
    Ok(())
}

fn list(status: Option<OrderStatus>, ctx: &Context) -> Result<()> {
    let currency = ctx.config.currency()?;
    let shop = ctx.open_storefront()?;
    let mut orders: Vec<Order> = shop
        .storage
        .orders()
        .into_iter()
        .filter(|o| status.map_or(true, |s| o.status == s))
        .collect();
    orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    if ctx.output.is_json() {
        ctx.output.json(&orders);
        return Ok(());
    }

    ctx.output.header(&format!("Orders ({})", orders.len()));
    if orders.is_empty() {
        ctx.output.info("No orders yet.");
        return Ok(());
    }

    let widths = [18, 24, 8, 16, 12];
    ctx.output
        .table_row(&["ORDER", "CUSTOMER", "ITEMS", "TOTAL", "STATUS"], &widths);
    let now = Utc::now();
    for order in &orders {
        let name = order.customer.full_name();
        let items = order.item_count().to_string();
        let total = format_currency(order.total, currency);
        let badge = status_badge(order.status);
        ctx.output.table_row(
            &[order.id.as_str(), &name[..], &items[..], &total[..], &badge[..]],
            &widths,
        );
        ctx.output.debug(&format!(
            "{} placed {}",
            order.id,
            relative_date(order.created_at, now)
        ));
    }
    Ok(())
}

fn print_order(order: &Order, currency: Currency, ctx: &Context) {
    let money = |amount: i64| format_currency(amount, currency);

    ctx.output.kv("Order", order.id.as_str());
    ctx.output.kv("Status", &status_badge(order.status));
    ctx.output.kv("Placed", &format_date(order.created_at));
    if let Some(updated) = order.updated_at {
        ctx.output.kv("Updated", &format_date(updated));
    }
    ctx.output.kv("Customer", &order.customer.full_name());
    ctx.output.kv(
        "Ship to",
        &format!("{}, {}", order.customer.address, order.customer.city_line()),
    );
    ctx.output.kv("Phone", &order.customer.phone);

    ctx.output.info("");
    for item in &order.items {
        ctx.output.list_item(&format!(
            "{} x {} = {}",
            item.quantity,
            item.product.name,
            money(item.line_total())
        ));
    }

    ctx.output.info("");
    ctx.output.kv("Subtotal", &money(order.subtotal));
    if order.discount > 0 {
        ctx.output.kv("Savings", &money(order.discount));
    }
    if let Some(code) = &order.coupon_code {
        ctx.output
            .kv(&format!("Coupon {}", code), &format!("-{}", money(order.coupon_discount)));
    }
    let shipping = if order.shipping == 0 {
        "FREE".to_string()
    } else {
        money(order.shipping)
    };
    ctx.output.kv("Shipping", &shipping);
    ctx.output.kv("Total", &money(order.total));
}

fn show(id: &str, ctx: &Context) -> Result<()> {
    let currency = ctx.config.currency()?;
    let shop = ctx.open_storefront()?;
    let order = find_order(shop.storage.order_by_id(id), id)?;

    if ctx.output.is_json() {
        ctx.output.json(&order);
        return Ok(());
    }
    ctx.output.header(&format!("Order {}", order.id));
    print_order(&order, currency, ctx);
    Ok(())
}

fn set_status(id: &str, status: OrderStatus, ctx: &Context) -> Result<()> {
    let shop = ctx.open_storefront()?;
    let session = shop.storage.require_admin()?;
    let order = find_order(shop.storage.update_order_status(id, status)?, id)?;

    if ctx.output.is_json() {
        ctx.output.json(&order);
        return Ok(());
    }
    ctx.output.success(&format!(
        "Order {} is now {} (by {})",
        order.id,
        status_badge(order.status),
        session.username
    ));
    Ok(())
}

fn cancel(id: &str, ctx: &Context) -> Result<()> {
    let mut shop = ctx.open_storefront()?;
    let order = find_order(shop.storage.order_by_id(id), id)?;
    if !order.status.can_cancel() {
        return Err(anyhow!(
            "Order {} is {} and can no longer be cancelled",
            id,
            order.status.display_name().to_lowercase()
        ));
    }
    if !ctx.confirm(&format!("Cancel order {}?", id))? {
        ctx.output.warn("Order left unchanged");
        return Ok(());
    }

    let checkout = ctx.checkout()?;
    let order = checkout.cancel_order(&shop.storage, &mut shop.engine, id)?;

    if ctx.output.is_json() {
        ctx.output.json(&order);
        return Ok(());
    }
    ctx.output.success(&format!("Order {} cancelled", order.id));
    Ok(())
}

fn invoice(id: &str, output: Option<&str>, ctx: &Context) -> Result<()> {
    let currency = ctx.config.currency()?;
    let shop = ctx.open_storefront()?;
    let order = find_order(shop.storage.order_by_id(id), id)?;
    let invoice = Invoice::for_order(&order);

    if ctx.output.is_json() && output.is_none() {
        ctx.output.json(&invoice);
        return Ok(());
    }

    let text = invoice.render(currency);
    match output {
        Some(path) => {
            let path = ctx.resolve_path(path);
            std::fs::write(&path, format!("{}\n", text))
                .with_context(|| format!("Failed to write invoice: {}", path.display()))?;
            ctx.output
                .success(&format!("Invoice {} saved to {}", invoice.number, path.display()));
        }
        None => println!("{}", text),
    }
    Ok(())
}
