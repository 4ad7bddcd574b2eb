//! Storefront CLI - browse the catalog and run a local shop from the terminal.
//!
//! Commands:
//! - `storefront products` - Filter, sort and page through the catalog
//! - `storefront show` - Product details and related products
//! - `storefront highlights` - Featured, best selling and new arrivals
//! - `storefront categories` - Category taxonomy
//! - `storefront cart` - Manage the shopping cart
//! - `storefront wishlist` - Manage the wishlist
//! - `storefront order` - Place, list and manage orders
//! - `storefront admin` - Catalog administration
//! - `storefront config` - Manage configuration

mod commands;
mod config;
mod context;
mod logging;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{
    AdminArgs, CartArgs, CategoriesArgs, ConfigArgs, HighlightsArgs, OrderArgs, ProductsArgs,
    ShowArgs, WishlistArgs,
};

/// Storefront CLI - a local shop over a generated catalog
#[derive(Parser)]
#[command(name = "storefront")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Directory holding persisted storefront state
    #[arg(long, global = true)]
    data_dir: Option<String>,

    /// Answer yes to confirmation prompts
    #[arg(short, long, global = true)]
    yes: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List catalog products
    Products(ProductsArgs),

    /// Show a single product
    Show(ShowArgs),

    /// Featured, best selling and newly arrived products
    Highlights(HighlightsArgs),

    /// List categories and subcategories
    Categories(CategoriesArgs),

    /// Manage the shopping cart
    Cart(CartArgs),

    /// Manage the wishlist
    Wishlist(WishlistArgs),

    /// Place and manage orders
    Order(OrderArgs),

    /// Catalog administration
    Admin(AdminArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.verbose, cli.json);

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let ctx = context::Context::load(cli.config.as_deref(), cli.data_dir.as_deref(), cli.yes, output)?;

    // Execute command
    let result = match cli.command {
        Commands::Products(args) => commands::products::run(args, &ctx),
        Commands::Show(args) => commands::show::run(args, &ctx),
        Commands::Highlights(args) => commands::highlights::run(args, &ctx),
        Commands::Categories(args) => commands::categories::run(args, &ctx),
        Commands::Cart(args) => commands::cart::run(args, &ctx),
        Commands::Wishlist(args) => commands::wishlist::run(args, &ctx),
        Commands::Order(args) => commands::order::run(args, &ctx),
        Commands::Admin(args) => commands::admin::run(args, &ctx),
        Commands::Config(args) => commands::config::run(args, &ctx),
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
