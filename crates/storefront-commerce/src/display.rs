//! Formatting helpers shared by front ends.

use crate::money::{Currency, Money};
use chrono::{DateTime, Utc};

/// Format an amount with its currency symbol (e.g., "৳ 12,345").
pub fn format_currency(amount: i64, currency: Currency) -> String {
    Money::new(amount, currency).display()
}

/// Rounded percentage saved, or 0 when not discounted.
pub fn calculate_discount(original_price: Option<i64>, price: i64) -> u8 {
    match original_price {
        Some(original) if original > 0 && original > price => {
            let pct = ((original - price) as f64 / original as f64 * 100.0).round();
            pct.clamp(0.0, 100.0) as u8
        }
        _ => 0,
    }
}

/// Stock availability label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockStatus {
    OutOfStock,
    LowStock(i64),
    InStock,
}

impl StockStatus {
    /// Units below which stock is reported as low.
    pub const LOW_STOCK_THRESHOLD: i64 = 10;

    pub fn label(&self) -> String {
        match self {
            StockStatus::OutOfStock => "Out of Stock".to_string(),
            StockStatus::LowStock(n) => format!("Only {n} left"),
            StockStatus::InStock => "In Stock".to_string(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StockStatus::OutOfStock => "out-stock",
            StockStatus::LowStock(_) => "low-stock",
            StockStatus::InStock => "in-stock",
        }
    }
}

/// Classify a stock level. Negative stock counts as out of stock.
pub fn stock_status(stock: i64) -> StockStatus {
    if stock <= 0 {
        StockStatus::OutOfStock
    } else if stock < StockStatus::LOW_STOCK_THRESHOLD {
        StockStatus::LowStock(stock)
    } else {
        StockStatus::InStock
    }
}

/// Cut `text` to `max_chars` characters and append "..." when it was longer.
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}...", &text[..byte_idx]),
        None => text.to_string(),
    }
}

/// "Mar 5, 2024".
pub fn format_date(at: DateTime<Utc>) -> String {
    at.format("%b %-d, %Y").to_string()
}

/// "Today", "Yesterday", "N days ago" within a week, else the date.
pub fn relative_date(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let days = (now.date_naive() - at.date_naive()).num_days().abs();
    match days {
        0 => "Today".to_string(),
        1 => "Yesterday".to_string(),
        2..=6 => format!("{days} days ago"),
        _ => format_date(at),
    }
}

/// Star counts for a rating out of `max_stars`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StarRating {
    pub full: u8,
    pub half: bool,
    pub empty: u8,
}

impl StarRating {
    /// Render as text (e.g., "★★★★⯪" for 4.5 of 5).
    pub fn render(&self) -> String {
        let mut out = "\u{2605}".repeat(self.full as usize);
        if self.half {
            out.push('\u{2bea}');
        }
        out.push_str(&"\u{2606}".repeat(self.empty as usize));
        out
    }
}

/// Split `rating` into full, half and empty stars.
pub fn star_rating(rating: f64, max_stars: u8) -> StarRating {
    let clamped = rating.clamp(0.0, f64::from(max_stars));
    let full = clamped.floor() as u8;
    let half = full < max_stars && clamped.fract() >= 0.5;
    let empty = max_stars - full - u8::from(half);
    StarRating { full, half, empty }
}
