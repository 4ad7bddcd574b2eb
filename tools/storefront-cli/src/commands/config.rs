//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, StorefrontConfig, CONFIG_NAMES};
use crate::context::Context;

/// Run the config command.
pub fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
        ConfigCommand::Validate => validate_config(ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Current Configuration");

    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    // Store section
    ctx.output.info("");
    ctx.output.info("[store]");
    ctx.output.kv("data_dir", &ctx.data_dir().display().to_string());

    // Catalog section
    ctx.output.info("");
    ctx.output.info("[catalog]");
    let catalog = &ctx.config.catalog;
    match &catalog.source {
        Some(source) => ctx.output.kv("source", source),
        None => ctx.output.kv("seed", &catalog.seed.to_string()),
    }
    ctx.output.kv("page_size", &catalog.page_size.to_string());
    ctx.output.kv("highlight_limit", &catalog.highlight_limit.to_string());
    ctx.output.kv("related_limit", &catalog.related_limit.to_string());

    // Shipping section
    ctx.output.info("");
    ctx.output.info("[shipping]");
    ctx.output
        .kv("free_threshold", &ctx.config.shipping.free_threshold.to_string());
    ctx.output.kv("flat_rate", &ctx.config.shipping.flat_rate.to_string());

    // Coupons
    if !ctx.config.coupons.is_empty() {
        ctx.output.info("");
        ctx.output.info("Coupons:");
        for coupon in &ctx.config.coupons {
            let minimum = if coupon.minimum_subtotal > 0 {
                format!(" (min {})", coupon.minimum_subtotal)
            } else {
                String::new()
            };
            ctx.output
                .list_item(&format!("{}: {}{}", coupon.code, coupon.describe(), minimum));
        }
    }

    ctx.output.info("");
    ctx.output.info("[currency]");
    ctx.output.kv("code", &ctx.config.currency.code);

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(CONFIG_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config())?;

    ctx.output
        .success(&format!("Created {}", config_path.display()));

    Ok(())
}

fn validate_config(ctx: &Context) -> Result<()> {
    let Some(path) = &ctx.config_path else {
        ctx.output.info("No config file found; using defaults.");
        return Ok(());
    };

    // Loading re-runs parsing and validation.
    let path = path.display().to_string();
    StorefrontConfig::load(&path)?;
    ctx.output.success(&format!("{} is valid", path));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::test_support::context;

    #[test]
    fn test_init_writes_default_once() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(dir.path());

        init_config(false, &ctx).unwrap();
        let path = dir.path().join("storefront.toml");
        assert!(StorefrontConfig::load(path.to_str().unwrap()).is_ok());

        assert!(init_config(false, &ctx).is_err());
        init_config(true, &ctx).unwrap();
    }

    #[test]
    fn test_show_and_validate() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = context(dir.path());
        show_config(&ctx).unwrap();
        validate_config(&ctx).unwrap();

        let path = dir.path().join("storefront.toml");
        std::fs::write(&path, "[currency]\ncode = \"JPY\"\n").unwrap();
        ctx.config_path = Some(path);
        assert!(validate_config(&ctx).is_err());
    }
}
