//! CLI command implementations.

pub mod admin;
pub mod cart;
pub mod categories;
pub mod config;
pub mod highlights;
pub mod order;
pub mod products;
pub mod show;
pub mod wishlist;

use anyhow::{anyhow, Result};
use clap::{Args, Subcommand};
use storefront_commerce::catalog::{CatalogEngine, CatalogStore, Product};
use storefront_commerce::checkout::OrderStatus;
use storefront_commerce::search::SortKey;
use storefront_commerce::ProductId;

/// Look up a product or fail with a readable message.
pub(crate) fn find_product<S: CatalogStore>(engine: &CatalogEngine<S>, id: u64) -> Result<&Product> {
    engine
        .get_by_id(ProductId(id))
        .ok_or_else(|| anyhow!("No product with id {}", id))
}

/// Arguments for the products command.
#[derive(Args)]
pub struct ProductsArgs {
    /// Free-text search over name, description, category and SKU.
    #[arg(short, long)]
    pub search: Option<String>,

    /// Category name.
    #[arg(long)]
    pub category: Option<String>,

    /// Subcategory name.
    #[arg(long)]
    pub subcategory: Option<String>,

    /// Minimum price.
    #[arg(long)]
    pub min_price: Option<i64>,

    /// Maximum price.
    #[arg(long)]
    pub max_price: Option<i64>,

    /// Minimum rating.
    #[arg(long)]
    pub min_rating: Option<f64>,

    /// Only products with stock.
    #[arg(long)]
    pub in_stock: bool,

    /// Sort order (featured, price-low, price-high, rating, newest, popular).
    #[arg(long, default_value = "featured")]
    pub sort: SortKey,

    /// Page number (1-indexed).
    #[arg(short, long, default_value = "1")]
    pub page: usize,

    /// Products per page (default from config).
    #[arg(long)]
    pub page_size: Option<usize>,
}

/// Arguments for the show command.
#[derive(Args)]
pub struct ShowArgs {
    /// Product id.
    pub id: u64,

    /// Number of related products to list (default from config).
    #[arg(long)]
    pub related: Option<usize>,
}

/// Arguments for the highlights command.
#[derive(Args)]
pub struct HighlightsArgs {
    /// Products per section (default from config).
    #[arg(short, long)]
    pub limit: Option<usize>,
}

/// Arguments for the categories command.
#[derive(Args)]
pub struct CategoriesArgs {
    /// Only show this category.
    pub category: Option<String>,
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: Option<CartCommand>,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Show the cart with totals.
    Show {
        /// Coupon code to price the cart with.
        #[arg(long)]
        coupon: Option<String>,
    },
    /// Add a product to the cart.
    Add {
        /// Product id.
        id: u64,
        /// Quantity to add.
        #[arg(short, long, default_value = "1")]
        quantity: i64,
    },
    /// Remove a product from the cart.
    Remove {
        /// Product id.
        id: u64,
    },
    /// Set the quantity of a cart line.
    Qty {
        /// Product id.
        id: u64,
        /// New quantity (at least 1).
        quantity: i64,
    },
    /// Empty the cart.
    Clear,
}

/// Arguments for the wishlist command.
#[derive(Args)]
pub struct WishlistArgs {
    #[command(subcommand)]
    pub command: Option<WishlistCommand>,
}

#[derive(Subcommand)]
pub enum WishlistCommand {
    /// List wishlist entries.
    List,
    /// Add a product.
    Add {
        /// Product id.
        id: u64,
    },
    /// Remove a product.
    Remove {
        /// Product id.
        id: u64,
    },
    /// Add the product if absent, remove it otherwise.
    Toggle {
        /// Product id.
        id: u64,
    },
}

/// Arguments for the order command.
#[derive(Args)]
pub struct OrderArgs {
    #[command(subcommand)]
    pub command: OrderCommand,
}

/// Delivery details given when placing an order.
#[derive(Args)]
pub struct CustomerArgs {
    #[arg(long)]
    pub first_name: String,
    #[arg(long)]
    pub last_name: String,
    #[arg(long)]
    pub email: String,
    /// Mobile number (e.g., 01712345678).
    #[arg(long)]
    pub phone: String,
    /// Street address.
    #[arg(long)]
    pub address: String,
    #[arg(long)]
    pub city: String,
    #[arg(long)]
    pub district: String,
    #[arg(long)]
    pub postal_code: Option<String>,
}

#[derive(Subcommand)]
pub enum OrderCommand {
    /// Place an order for the current cart.
    Place {
        #[command(flatten)]
        customer: CustomerArgs,
        /// Coupon code.
        #[arg(long)]
        coupon: Option<String>,
    },
    /// List orders, newest first.
    List {
        /// Only orders in this status.
        #[arg(long)]
        status: Option<OrderStatus>,
    },
    /// Show an order.
    Show {
        /// Order id (e.g., ORD1700000000000).
        id: String,
    },
    /// Change an order's status (admin).
    Status {
        /// Order id.
        id: String,
        /// New status (pending, processing, shipped, delivered, cancelled).
        status: OrderStatus,
    },
    /// Cancel an order.
    Cancel {
        /// Order id.
        id: String,
    },
    /// Print or save an order's invoice.
    Invoice {
        /// Order id.
        id: String,
        /// Write the invoice to this file instead of printing it.
        #[arg(short, long)]
        output: Option<String>,
    },
}

/// Arguments for the admin command.
#[derive(Args)]
pub struct AdminArgs {
    #[command(subcommand)]
    pub command: AdminCommand,
}

#[derive(Subcommand)]
pub enum AdminCommand {
    /// Start an admin session.
    Login {
        /// Admin user name.
        #[arg(default_value = "admin")]
        username: String,
    },
    /// End the admin session.
    Logout,
    /// Show the current admin session.
    Whoami,
    /// Add a product.
    Add(ProductFields),
    /// Update fields of a product.
    Update {
        /// Product id.
        id: u64,
        #[command(flatten)]
        fields: ProductUpdate,
    },
    /// Delete a product.
    Delete {
        /// Product id.
        id: u64,
    },
    /// Adjust stock by a signed amount.
    Stock {
        /// Product id.
        id: u64,
        /// Units to add (negative to remove).
        #[arg(allow_hyphen_values = true)]
        delta: i64,
    },
}

/// Fields for a new product.
#[derive(Args)]
pub struct ProductFields {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub category: String,
    #[arg(long)]
    pub subcategory: String,
    #[arg(long)]
    pub price: i64,
    /// Price before discount.
    #[arg(long)]
    pub original_price: Option<i64>,
    #[arg(long, default_value = "0")]
    pub stock: i64,
    #[arg(long, default_value = "")]
    pub sku: String,
    #[arg(long, default_value = "")]
    pub description: String,
    /// Image URL; repeat for more.
    #[arg(long = "image")]
    pub images: Vec<String>,
}

/// Fields to change on an existing product.
#[derive(Args)]
pub struct ProductUpdate {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long)]
    pub subcategory: Option<String>,
    #[arg(long)]
    pub sku: Option<String>,
    #[arg(long)]
    pub price: Option<i64>,
    /// Price before discount.
    #[arg(long, conflicts_with = "clear_original_price")]
    pub original_price: Option<i64>,
    /// Remove the price before discount.
    #[arg(long)]
    pub clear_original_price: bool,
    #[arg(long)]
    pub stock: Option<i64>,
    #[arg(long)]
    pub rating: Option<f64>,
    #[arg(long)]
    pub featured: Option<bool>,
    #[arg(long)]
    pub best_selling: Option<bool>,
    #[arg(long)]
    pub new_arrival: Option<bool>,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file.
    Validate,
}
