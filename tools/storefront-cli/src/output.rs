//! Output formatting for the CLI.

use console::{pad_str, style, Alignment};
use storefront_commerce::catalog::Product;
use storefront_commerce::checkout::OrderStatus;
use storefront_commerce::display::{format_currency, star_rating, stock_status, StockStatus};
use storefront_commerce::Currency;

/// Output handler for CLI messages.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    /// Create a new output handler.
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    /// Print an info message.
    pub fn info(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("ℹ").blue(), msg);
    }

    /// Print a success message.
    pub fn success(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("✓").green(), msg);
    }

    /// Print a warning message.
    pub fn warn(&self, msg: &str) {
        if self.json {
            return;
        }
        eprintln!("{} {}", style("⚠").yellow(), msg);
    }

    /// Print an error message.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
            return;
        }
        eprintln!("{} {}", style("✗").red(), style(msg).red());
    }

    /// Print a debug message (only in verbose mode).
    pub fn debug(&self, msg: &str) {
        if !self.verbose || self.json {
            return;
        }
        eprintln!("{} {}", style("→").dim(), style(msg).dim());
    }

    /// Print a header/title.
    pub fn header(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print a plain line.
    pub fn line(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{}", msg);
    }

    /// Print JSON output.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }

    /// Print a key-value pair.
    pub fn kv(&self, key: &str, value: &str) {
        if self.json {
            return;
        }
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a list item.
    pub fn list_item(&self, item: &str) {
        if self.json {
            return;
        }
        println!("  {} {}", style("•").dim(), item);
    }

    /// Print a table row.
    pub fn table_row(&self, cols: &[&str], widths: &[usize]) {
        if self.json {
            return;
        }
        let formatted: Vec<String> = cols
            .iter()
            .zip(widths.iter())
            .map(|(col, width)| pad_str(col, *width, Alignment::Left, None).into_owned())
            .collect();
        println!("  {}", formatted.join("  "));
    }

    /// Print one product as a table row.
    pub fn product_row(&self, product: &Product, currency: Currency) {
        let id = product.id.to_string();
        let name = storefront_commerce::display::truncate_text(&product.name, 40);
        let price = price_label(product, currency);
        let rating = format!("{:.1}", product.rating);
        let stock = stock_badge(stock_status(product.stock));
        self.table_row(
            &[&id[..], &name[..], &price[..], &rating[..], &stock[..]],
            &PRODUCT_COLUMNS.map(|(_, w)| w),
        );
    }

    /// Print the header row matching [`Output::product_row`].
    pub fn product_header(&self) {
        let titles = PRODUCT_COLUMNS.map(|(t, _)| t);
        self.table_row(&titles, &PRODUCT_COLUMNS.map(|(_, w)| w));
    }

    /// Check if JSON mode is enabled.
    pub fn is_json(&self) -> bool {
        self.json
    }
}

const PRODUCT_COLUMNS: [(&str, usize); 5] = [
    ("ID", 5),
    ("NAME", 40),
    ("PRICE", 22),
    ("RATING", 6),
    ("STOCK", 14),
];

/// Price, with the discount percentage when on sale.
pub fn price_label(product: &Product, currency: Currency) -> String {
    let price = format_currency(product.price, currency);
    match product.original_price {
        Some(original) if product.is_on_sale() => {
            let pct = storefront_commerce::display::calculate_discount(Some(original), product.price);
            format!("{} ({}% off)", price, pct)
        }
        _ => price,
    }
}

/// Rating as stars followed by the number.
pub fn stars(rating: f64) -> String {
    format!("{} {:.1}", star_rating(rating, 5).render(), rating)
}

/// Status badge for stock levels.
pub fn stock_badge(status: StockStatus) -> String {
    match status {
        StockStatus::InStock => style(status.label()).green().to_string(),
        StockStatus::LowStock(_) => style(status.label()).yellow().to_string(),
        StockStatus::OutOfStock => style(status.label()).red().to_string(),
    }
}

/// Status badge for order states.
pub fn status_badge(status: OrderStatus) -> String {
    let name = status.display_name();
    match status {
        OrderStatus::Delivered => style(name).green().to_string(),
        OrderStatus::Pending | OrderStatus::Processing => style(name).yellow().to_string(),
        OrderStatus::Shipped => style(name).cyan().to_string(),
        OrderStatus::Cancelled => style(name).dim().to_string(),
    }
}
