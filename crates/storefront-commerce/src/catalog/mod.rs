//! Product catalog module.
//!
//! Contains product and category types, the catalog query engine and the
//! synthetic catalog generator.

mod category;
mod engine;
mod generator;
mod product;
mod store;

pub use category::{default_taxonomy, find_category, Category};
pub use engine::{CatalogEngine, DEFAULT_PAGE_SIZE};
pub use generator::{generate_catalog, generate_catalog_at, CatalogData};
pub use product::{NewProduct, Product, ProductPatch, Review};
pub use store::{CatalogStore, MemoryCatalogStore, NullCatalogStore};

#[cfg(test)]
pub(crate) use product::fixtures;
