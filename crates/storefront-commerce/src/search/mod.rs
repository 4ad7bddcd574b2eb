//! Search module.
//!
//! Contains the filter state, sort keys, and result pages used by the catalog
//! engine.

mod filter;
mod results;
mod sort;

pub use filter::FilterState;
pub use results::{total_pages, Page};
pub use sort::{SortKey, UnknownSortKey};
