//! Catalog administration.
//!
//! Everything except `login` needs an admin session started on this machine.

use anyhow::{anyhow, Result};
use storefront_commerce::catalog::{NewProduct, ProductPatch};
use storefront_commerce::display::{calculate_discount, format_date};
use storefront_commerce::ProductId;
use storefront_store::StorageManager;

use super::{find_product, AdminArgs, AdminCommand, ProductFields, ProductUpdate};
use crate::context::Context;

/// Run the admin command.
pub fn run(args: AdminArgs, ctx: &Context) -> Result<()> {
    match args.command {
        AdminCommand::Login { username } => login(&username, ctx),
        AdminCommand::Logout => logout(ctx),
        AdminCommand::Whoami => whoami(ctx),
        AdminCommand::Add(fields) => add(fields, ctx),
        AdminCommand::Update { id, fields } => update(id, fields, ctx),
        AdminCommand::Delete { id } => delete(id, ctx),
        AdminCommand::Stock { id, delta } => stock(id, delta, ctx),
    }
}

fn require_admin(storage: &StorageManager) -> Result<String> {
    storage
        .require_admin()
        .map(|session| session.username)
        .map_err(|_| anyhow!("Admin login required (run `storefront admin login`)"))
}

impl From<ProductFields> for NewProduct {
    fn from(fields: ProductFields) -> Self {
        NewProduct {
            name: fields.name,
            description: fields.description,
            category: fields.category,
            subcategory: fields.subcategory,
            sku: fields.sku,
            price: fields.price,
            original_price: fields.original_price,
            discount: calculate_discount(fields.original_price, fields.price),
            stock: fields.stock,
            images: fields.images,
            ..Default::default()
        }
    }
}

impl From<ProductUpdate> for ProductPatch {
    fn from(update: ProductUpdate) -> Self {
        let original_price = if update.clear_original_price {
            Some(None)
        } else {
            update.original_price.map(Some)
        };
        ProductPatch {
            name: update.name,
            description: update.description,
            category: update.category,
            subcategory: update.subcategory,
            sku: update.sku,
            price: update.price,
            original_price,
            stock: update.stock,
            rating: update.rating,
            featured: update.featured,
            best_selling: update.best_selling,
            new_arrival: update.new_arrival,
            ..Default::default()
        }
    }
}

/// Discount for a price pair, refusing a sale price above the original.
fn checked_discount(price: i64, original_price: Option<i64>) -> Result<u8> {
    if price < 0 {
        return Err(anyhow!("Price cannot be negative"));
    }
    if let Some(original) = original_price {
        if original < price {
            return Err(anyhow!(
                "Original price {} is below the price {}",
                original,
                price
            ));
        }
    }
    Ok(calculate_discount(original_price, price))
}

fn login(username: &str, ctx: &Context) -> Result<()> {
    if username.trim().is_empty() {
        return Err(anyhow!("User name cannot be blank"));
    }
    let shop = ctx.open_storefront()?;
    let session = shop.storage.set_admin_session(username.trim())?;
    ctx.output.success(&format!("Logged in as {}", session.username));
    ctx.output.debug(&format!("session {}", session.token));
    Ok(())
}

fn logout(ctx: &Context) -> Result<()> {
    let shop = ctx.open_storefront()?;
    if !shop.storage.is_admin_logged_in() {
        ctx.output.info("No admin session.");
        return Ok(());
    }
    shop.storage.clear_admin_session()?;
    ctx.output.success("Logged out");
    Ok(())
}

fn whoami(ctx: &Context) -> Result<()> {
    let shop = ctx.open_storefront()?;
    match shop.storage.admin_session() {
        Some(session) => {
            if ctx.output.is_json() {
                ctx.output.json(&session);
                return Ok(());
            }
            ctx.output.kv("User", &session.username);
            ctx.output.kv("Since", &format_date(session.login_time));
        }
        None => ctx.output.info("Not logged in."),
    }
    Ok(())
}

fn add(fields: ProductFields, ctx: &Context) -> Result<()> {
    let mut shop = ctx.open_storefront()?;
    require_admin(&shop.storage)?;
    if fields.name.trim().is_empty() {
        return Err(anyhow!("Product name cannot be blank"));
    }
    checked_discount(fields.price, fields.original_price)?;

    let product = shop.engine.add_product(fields.into());

    if ctx.output.is_json() {
        ctx.output.json(&product);
        return Ok(());
    }
    ctx.output
        .success(&format!("Added product {} ({})", product.id, product.name));
    Ok(())
}

fn update(id: u64, fields: ProductUpdate, ctx: &Context) -> Result<()> {
    let mut shop = ctx.open_storefront()?;
    require_admin(&shop.storage)?;
    let mut patch = ProductPatch::from(fields);
    if patch.is_empty() {
        return Err(anyhow!("Nothing to update"));
    }

    if patch.price.is_some() || patch.original_price.is_some() {
        let current = find_product(&shop.engine, id)?;
        let price = patch.price.unwrap_or(current.price);
        let original_price = patch.original_price.unwrap_or(current.original_price);
        patch.discount = Some(checked_discount(price, original_price)?);
    }

    let product = shop
        .engine
        .update_product(ProductId(id), &patch)
        .ok_or_else(|| anyhow!("No product with id {}", id))?;

    if ctx.output.is_json() {
        ctx.output.json(&product);
        return Ok(());
    }
    ctx.output.success(&format!("Updated product {} ({})", product.id, product.name));
    Ok(())
}

fn delete(id: u64, ctx: &Context) -> Result<()> {
    let mut shop = ctx.open_storefront()?;
    require_admin(&shop.storage)?;
    let name = find_product(&shop.engine, id)?.name.clone();

    if !ctx.confirm(&format!("Delete product {} ({})?", id, name))? {
        ctx.output.warn("Product kept");
        return Ok(());
    }
    shop.engine.delete_product(ProductId(id));
    ctx.output.success(&format!("Deleted product {} ({})", id, name));
    Ok(())
}

fn stock(id: u64, delta: i64, ctx: &Context) -> Result<()> {
    let mut shop = ctx.open_storefront()?;
    require_admin(&shop.storage)?;

    let product = shop
        .engine
        .adjust_stock(ProductId(id), delta)
        .ok_or_else(|| anyhow!("No product with id {}", id))?;

    if ctx.output.is_json() {
        ctx.output.json(&product);
        return Ok(());
    }
    ctx.output
        .success(&format!("Stock of {} is now {}", product.name, product.stock));
    if product.stock < 0 {
        ctx.output.warn("Stock is below zero");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::test_support::context;

    fn fields() -> ProductFields {
        ProductFields {
            name: "Clay Tea Set".to_string(),
            category: "Home & Living".to_string(),
            subcategory: "Kitchen".to_string(),
            price: 1200,
            original_price: Some(1500),
            stock: 6,
            sku: "HL-TEA-01".to_string(),
            description: String::new(),
            images: Vec::new(),
        }
    }

    fn no_update() -> ProductUpdate {
        ProductUpdate {
            name: None,
            description: None,
            category: None,
            subcategory: None,
            sku: None,
            price: None,
            original_price: None,
            clear_original_price: false,
            stock: None,
            rating: None,
            featured: None,
            best_selling: None,
            new_arrival: None,
        }
    }

    #[test]
    fn test_mutations_require_login() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(dir.path());

        assert!(add(fields(), &ctx).is_err());
        assert!(stock(1, 5, &ctx).is_err());
        assert!(delete(1, &ctx).is_err());
    }

    #[test]
    fn test_admin_flow() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(dir.path());
        login("manager", &ctx).unwrap();
        whoami(&ctx).unwrap();

        add(fields(), &ctx).unwrap();
        let added = {
            let shop = ctx.open_storefront().unwrap();
            shop.engine
                .all_products()
                .iter()
                .find(|p| p.sku == "HL-TEA-01")
                .unwrap()
                .clone()
        };
        assert_eq!(added.discount, 20);

        let mut patch = no_update();
        patch.price = Some(1000);
        patch.clear_original_price = true;
        update(added.id.get(), patch, &ctx).unwrap();
        assert!(update(added.id.get(), no_update(), &ctx).is_err());

        stock(added.id.get(), -10, &ctx).unwrap();
        {
            let shop = ctx.open_storefront().unwrap();
            let p = shop.engine.get_by_id(added.id).unwrap();
            assert_eq!(p.price, 1000);
            assert_eq!(p.original_price, None);
            assert_eq!(p.stock, -4);
        }

        delete(added.id.get(), &ctx).unwrap();
        assert!(ctx.open_storefront().unwrap().engine.get_by_id(added.id).is_none());

        logout(&ctx).unwrap();
        assert!(stock(1, 1, &ctx).is_err());
    }

    fn product_by_sku(ctx: &Context, sku: &str) -> storefront_commerce::catalog::Product {
        let shop = ctx.open_storefront().unwrap();
        shop.engine
            .all_products()
            .iter()
            .find(|p| p.sku == sku)
            .unwrap()
            .clone()
    }

    #[test]
    fn test_add_rejects_original_below_price() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(dir.path());
        login("manager", &ctx).unwrap();

        let mut bad = fields();
        bad.price = 2000;
        bad.original_price = Some(1500);
        assert!(add(bad, &ctx).is_err());
        let shop = ctx.open_storefront().unwrap();
        assert!(shop.engine.all_products().iter().all(|p| p.sku != "HL-TEA-01"));
    }

    #[test]
    fn test_update_recomputes_discount() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(dir.path());
        login("manager", &ctx).unwrap();

        let mut plain = fields();
        plain.price = 2000;
        plain.original_price = None;
        add(plain, &ctx).unwrap();
        let id = product_by_sku(&ctx, "HL-TEA-01").id;
        assert_eq!(product_by_sku(&ctx, "HL-TEA-01").discount, 0);

        let mut patch = no_update();
        patch.original_price = Some(2500);
        update(id.get(), patch, &ctx).unwrap();
        let p = product_by_sku(&ctx, "HL-TEA-01");
        assert_eq!(p.original_price, Some(2500));
        assert_eq!(p.discount, 20);

        // Raising the price above the stored original is refused.
        let mut patch = no_update();
        patch.price = Some(3000);
        assert!(update(id.get(), patch, &ctx).is_err());
        let p = product_by_sku(&ctx, "HL-TEA-01");
        assert_eq!(p.price, 2000);
        assert_eq!(p.discount, 20);

        let mut patch = no_update();
        patch.price = Some(2250);
        update(id.get(), patch, &ctx).unwrap();
        assert_eq!(product_by_sku(&ctx, "HL-TEA-01").discount, 10);

        let mut patch = no_update();
        patch.clear_original_price = true;
        update(id.get(), patch, &ctx).unwrap();
        assert_eq!(product_by_sku(&ctx, "HL-TEA-01").discount, 0);
    }

    #[test]
    fn test_patch_from_flags() {
        let mut update = no_update();
        update.original_price = Some(900);
        update.featured = Some(true);
        let patch = ProductPatch::from(update);
        assert_eq!(patch.original_price, Some(Some(900)));
        assert_eq!(patch.featured, Some(true));
        assert!(patch.name.is_none());
    }
}
