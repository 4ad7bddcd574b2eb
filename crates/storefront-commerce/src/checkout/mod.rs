//! Checkout module.
//!
//! Contains customer details, order drafts and records, and invoices.

mod customer;
mod invoice;
mod order;

pub use customer::{is_valid_email, is_valid_phone, Customer};
pub use invoice::{Invoice, InvoiceLine};
pub use order::{Order, OrderDraft, OrderStatus};

