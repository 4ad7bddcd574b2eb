//! Plain-text invoices for recorded orders.

use crate::checkout::Order;
use crate::display::{format_currency, format_date};
use crate::money::Currency;
use serde::Serialize;

/// One priced line on an invoice.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceLine {
    pub name: String,
    pub price: i64,
    pub quantity: i64,
    pub total: i64,
}

/// Invoice view of an order.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    /// `INV-<orderId>`.
    pub number: String,
    pub order_id: String,
    pub date: String,
    pub bill_to: Vec<String>,
    pub lines: Vec<InvoiceLine>,
    pub subtotal: i64,
    pub savings: i64,
    pub coupon_code: Option<String>,
    pub coupon_discount: i64,
    pub shipping: i64,
    pub total: i64,
}

impl Invoice {
    /// Build the invoice for `order`.
    pub fn for_order(order: &Order) -> Self {
        let lines = order
            .items
            .iter()
            .map(|item| InvoiceLine {
                name: item.product.name.clone(),
                price: item.product.price,
                quantity: item.quantity,
                total: item.line_total(),
            })
            .collect();

        Self {
            number: format!("INV-{}", order.id),
            order_id: order.id.to_string(),
            date: format_date(order.created_at),
            bill_to: order.customer.multi_line().lines().map(str::to_string).collect(),
            lines,
            subtotal: order.subtotal,
            savings: order.discount,
            coupon_code: order.coupon_code.clone(),
            coupon_discount: order.coupon_discount,
            shipping: order.shipping,
            total: order.total,
        }
    }

    /// Render as fixed-width text.
    pub fn render(&self, currency: Currency) -> String {
        let money = |amount: i64| format_currency(amount, currency);
        let mut out = Vec::new();

        out.push(format!("INVOICE {}", self.number));
        out.push(format!("Order ID: {}", self.order_id));
        out.push(format!("Date: {}", self.date));
        out.push(String::new());
        out.push("Bill To:".to_string());
        out.extend(self.bill_to.iter().map(|l| format!("  {l}")));
        out.push(String::new());
        out.push(format!(
            "{:<36} {:>12} {:>5} {:>14}",
            "Item", "Price", "Qty", "Total"
        ));
        for line in &self.lines {
            out.push(format!(
                "{:<36} {:>12} {:>5} {:>14}",
                truncate_name(&line.name, 36),
                money(line.price),
                line.quantity,
                money(line.total)
            ));
        }
        out.push(String::new());
        out.push(format!("{:<20} {:>14}", "Subtotal:", money(self.subtotal)));
        if self.savings > 0 {
            out.push(format!("{:<20} {:>14}", "Product Savings:", format!("-{}", money(self.savings))));
        }
        if self.coupon_discount > 0 {
            let label = format!(
                "Coupon ({}):",
                self.coupon_code.as_deref().unwrap_or("Voucher")
            );
            out.push(format!("{:<20} {:>14}", label, format!("-{}", money(self.coupon_discount))));
        }
        let shipping = if self.shipping == 0 {
            "FREE".to_string()
        } else {
            money(self.shipping)
        };
        out.push(format!("{:<20} {:>14}", "Shipping:", shipping));
        out.push(format!("{:<20} {:>14}", "Total:", money(self.total)));
        out.join("\n")
    }
}

fn truncate_name(name: &str, width: usize) -> String {
    if name.chars().count() <= width {
        name.to_string()
    } else {
        let cut: String = name.chars().take(width.saturating_sub(3)).collect();
        format!("{cut}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkout::order::fixtures::draft;
    use crate::ids::OrderId;
    use chrono::{TimeZone, Utc};

    fn order() -> Order {
        let at = Utc.with_ymd_and_hms(2024, 3, 5, 10, 0, 0).unwrap();
        draft().into_order(OrderId::from_millis(1_709_632_800_000), at)
    }

    #[test]
    fn test_invoice_lines() {
        let invoice = Invoice::for_order(&order());
        assert_eq!(invoice.number, "INV-ORD1709632800000");
        assert_eq!(invoice.lines.len(), 1);
        assert_eq!(invoice.lines[0].total, 2000);
        assert_eq!(invoice.bill_to[0], "Rahim Uddin");
        assert_eq!(invoice.date, "Mar 5, 2024");
    }

    #[test]
    fn test_render_text() {
        let text = Invoice::for_order(&order()).render(Currency::BDT);
        assert!(text.contains("INV-ORD1709632800000"));
        assert!(text.contains("\u{09f3} 2,100"));
        assert!(!text.contains("Coupon"));
    }
}
