//! Catalog query engine.
//!
//! Owns the product collection and the current filter/sort state, and
//! serves pages of the filtered view. Every filter change re-derives the view
//! from the full collection using all active filters; sort changes only
//! reorder the current view.
//!
//! Nothing here returns an error. Unknown ids give `None`/`false`,
//! out-of-range pages are empty, and persistence failures are logged and
//! ignored so the in-memory state stays usable.

use crate::catalog::{
    find_category, CatalogData, CatalogStore, Category, NewProduct, NullCatalogStore, Product,
    ProductPatch,
};
use crate::ids::ProductId;
use crate::search::{FilterState, Page, SortKey};
use chrono::Utc;
use tracing::{debug, info, warn};

/// Default number of products per page.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// In-memory catalog with filtering, sorting and pagination.
///
/// One instance serves one session. Share it across threads only behind
/// your own lock.
#[derive(Debug)]
pub struct CatalogEngine<S = NullCatalogStore> {
    store: S,
    products: Vec<Product>,
    categories: Vec<Category>,
    /// Positions into `products`, in filter-then-sort order.
    view: Vec<usize>,
    filter: FilterState,
    sort: SortKey,
    current_page: usize,
    page_size: usize,
}

impl Default for CatalogEngine<NullCatalogStore> {
    fn default() -> Self {
        Self::new(NullCatalogStore)
    }
}

impl<S: CatalogStore> CatalogEngine<S> {
    /// Create an empty engine writing through to `store`.
    pub fn new(store: S) -> Self {
        Self {
            store,
            products: Vec::new(),
            categories: Vec::new(),
            view: Vec::new(),
            filter: FilterState::default(),
            sort: SortKey::default(),
            current_page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Load `data`, preferring a snapshot previously saved to the store.
    pub fn initialize(&mut self, data: CatalogData) {
        let persisted = match self.store.load_products() {
            Ok(persisted) => persisted,
            Err(e) => {
                warn!(error = %e, "could not read saved catalog, using source data");
                None
            }
        };
        self.initialize_with(data, persisted);
    }

    /// Replace all state with `persisted` if present, else `data.products`.
    ///
    /// The view becomes the whole collection in stored order; no sort is
    /// applied until a filter or sort operation runs.
    pub fn initialize_with(&mut self, data: CatalogData, persisted: Option<Vec<Product>>) {
        let from_snapshot = persisted.is_some();
        self.products = persisted.unwrap_or(data.products);
        self.categories = data.categories;
        self.filter = FilterState::default();
        self.sort = SortKey::default();
        self.current_page = 1;
        self.view = (0..self.products.len()).collect();
        info!(
            products = self.products.len(),
            from_snapshot, "catalog initialized"
        );
    }

    /// The persistence collaborator.
    pub fn store(&self) -> &S {
        &self.store
    }

    // ----- Queries -----

    /// Return one page of the filtered view.
    pub fn get_page(&mut self, page_number: usize, page_size: usize) -> Page<Product> {
        self.current_page = page_number;
        self.page_size = page_size;
        let items: Vec<&Product> = self.view.iter().map(|&i| &self.products[i]).collect();
        Page::slice(&items, page_number, page_size).map(Product::clone)
    }

    /// Find a product by id in the full collection.
    pub fn get_by_id(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Iterate over the filtered view in sort order.
    pub fn filtered(&self) -> impl Iterator<Item = &Product> + '_ {
        self.view.iter().map(|&i| &self.products[i])
    }

    /// Ids in the filtered view, in sort order.
    pub fn filtered_ids(&self) -> Vec<ProductId> {
        self.filtered().map(|p| p.id).collect()
    }

    /// Number of products in the filtered view.
    pub fn filtered_len(&self) -> usize {
        self.view.len()
    }

    /// The full collection in insertion order.
    pub fn all_products(&self) -> &[Product] {
        &self.products
    }

    pub fn current_filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn current_sort(&self) -> SortKey {
        self.sort
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// The category taxonomy supplied at initialization.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Subcategories of `category`, empty when unknown.
    pub fn subcategories(&self, category: &str) -> &[String] {
        find_category(&self.categories, category)
            .map(|c| c.subcategories.as_slice())
            .unwrap_or(&[])
    }

    /// First `limit` featured products in insertion order.
    pub fn get_featured(&self, limit: usize) -> Vec<&Product> {
        self.flagged(limit, |p| p.featured)
    }

    /// First `limit` best sellers in insertion order.
    pub fn get_best_selling(&self, limit: usize) -> Vec<&Product> {
        self.flagged(limit, |p| p.best_selling)
    }

    /// First `limit` new arrivals in insertion order.
    pub fn get_new_arrivals(&self, limit: usize) -> Vec<&Product> {
        self.flagged(limit, |p| p.new_arrival)
    }

    fn flagged(&self, limit: usize, flag: impl Fn(&Product) -> bool) -> Vec<&Product> {
        self.products.iter().filter(|p| flag(p)).take(limit).collect()
    }

    /// Up to `limit` other products sharing the subcategory of `id`.
    pub fn get_related(&self, id: ProductId, limit: usize) -> Vec<&Product> {
        let Some(product) = self.get_by_id(id) else {
            return Vec::new();
        };
        self.products
            .iter()
            .filter(|p| p.id != id && p.subcategory == product.subcategory)
            .take(limit)
            .collect()
    }

    // ----- Filters and sort -----

    /// Set the search term and recompute the view. Returns the view size.
    pub fn search(&mut self, query: &str) -> usize {
        self.filter.set_search(query);
        self.apply_filters()
    }

    /// Filter by category and optional subcategory; `None` clears.
    pub fn filter_by_category(&mut self, category: Option<&str>, subcategory: Option<&str>) -> usize {
        self.filter.category = category.map(str::to_string);
        self.filter.subcategory = subcategory.map(str::to_string);
        self.apply_filters()
    }

    /// Filter by inclusive price range; `None` max is unbounded.
    pub fn filter_by_price_range(&mut self, min: i64, max: Option<i64>) -> usize {
        self.filter.price_min = min;
        self.filter.price_max = max;
        self.apply_filters()
    }

    /// Filter by minimum rating.
    pub fn filter_by_rating(&mut self, min: f64) -> usize {
        self.filter.rating = min;
        self.apply_filters()
    }

    /// Toggle the in-stock-only filter.
    pub fn filter_by_stock(&mut self, in_stock_only: bool) -> usize {
        self.filter.in_stock = in_stock_only;
        self.apply_filters()
    }

    /// Replace the whole filter at once.
    pub fn apply_filter(&mut self, filter: FilterState) -> usize {
        self.filter = filter;
        self.apply_filters()
    }

    /// Change the sort key and reorder the current view.
    pub fn sort(&mut self, key: SortKey) -> usize {
        self.sort = key;
        self.apply_sort();
        self.view.len()
    }

    /// Reset every filter and show the whole collection in sort order.
    pub fn clear_filters(&mut self) -> usize {
        self.filter = FilterState::default();
        self.view = (0..self.products.len()).collect();
        self.apply_sort();
        self.view.len()
    }

    fn apply_filters(&mut self) -> usize {
        let filter = &self.filter;
        self.view = self
            .products
            .iter()
            .enumerate()
            .filter(|(_, p)| filter.matches(p))
            .map(|(i, _)| i)
            .collect();
        self.apply_sort();
        debug!(
            matched = self.view.len(),
            total = self.products.len(),
            sort = %self.sort,
            "recomputed catalog view"
        );
        self.view.len()
    }

    fn apply_sort(&mut self) {
        let products = &self.products;
        let key = self.sort;
        // `sort_by` is stable, so ties keep their current order.
        self.view
            .sort_by(|&a, &b| key.compare(&products[a], &products[b]));
    }

    // ----- Admin mutations -----

    /// Append a new product with the next free id.
    pub fn add_product(&mut self, data: NewProduct) -> Product {
        let id = self
            .products
            .iter()
            .map(|p| p.id)
            .max()
            .map(ProductId::next)
            .unwrap_or(ProductId(1));
        let product = data.into_product(id, Utc::now());
        self.products.push(product.clone());
        info!(product_id = %id, name = %product.name, "product added");
        self.persist();
        self.apply_filters();
        product
    }

    /// Overwrite the fields in `patch` on product `id`.
    pub fn update_product(&mut self, id: ProductId, patch: &ProductPatch) -> Option<Product> {
        let product = self.products.iter_mut().find(|p| p.id == id)?;
        product.apply_patch(patch);
        let updated = product.clone();
        info!(product_id = %id, "product updated");
        self.persist();
        self.apply_filters();
        Some(updated)
    }

    /// Remove product `id`. Returns whether it existed.
    pub fn delete_product(&mut self, id: ProductId) -> bool {
        let Some(index) = self.products.iter().position(|p| p.id == id) else {
            return false;
        };
        self.products.remove(index);
        info!(product_id = %id, "product deleted");
        self.persist();
        self.apply_filters();
        true
    }

    /// Add `delta` to the stock of product `id`.
    ///
    /// There is no floor; stock may go negative. The view is not recomputed,
    /// so an in-stock filter keeps showing the product until the next filter
    /// change.
    pub fn adjust_stock(&mut self, id: ProductId, delta: i64) -> Option<Product> {
        let product = self.products.iter_mut().find(|p| p.id == id)?;
        product.stock = product.stock.saturating_add(delta);
        let updated = product.clone();
        info!(product_id = %id, delta, stock = updated.stock, "stock adjusted");
        self.persist();
        Some(updated)
    }

    fn persist(&self) {
        if let Err(e) = self.store.save_products(&self.products) {
            warn!(error = %e, "failed to persist catalog, continuing in memory");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::product;
    use crate::catalog::{default_taxonomy, MemoryCatalogStore};
    use std::sync::Arc;

    fn data(products: Vec<Product>) -> CatalogData {
        CatalogData {
            products,
            categories: default_taxonomy(),
        }
    }

    fn engine(products: Vec<Product>) -> CatalogEngine {
        let mut engine = CatalogEngine::default();
        engine.initialize(data(products));
        engine
    }

    fn ids(products: &[&Product]) -> Vec<u64> {
        products.iter().map(|p| p.id.get()).collect()
    }

    fn view_ids<S: CatalogStore>(engine: &CatalogEngine<S>) -> Vec<u64> {
        engine.filtered_ids().into_iter().map(ProductId::get).collect()
    }

    fn with_category(mut p: Product, category: &str, subcategory: &str) -> Product {
        p.category = category.to_string();
        p.subcategory = subcategory.to_string();
        p
    }

    #[test]
    fn test_initialize_keeps_insertion_order() {
        let mut e = engine(vec![
            product(1, 300, 3.0, false),
            product(2, 100, 5.0, true),
        ]);
        assert_eq!(view_ids(&e), vec![1, 2]);
        let page = e.get_page(1, 20);
        assert_eq!(page.total, 2);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn test_initialize_prefers_persisted_snapshot() {
        let store = MemoryCatalogStore::with_snapshot(vec![product(9, 100, 4.0, false)]);
        let mut e = CatalogEngine::new(store);
        e.initialize(data(vec![product(1, 100, 4.0, false)]));
        assert_eq!(view_ids(&e), vec![9]);
    }

    #[test]
    fn test_initialize_twice_replaces_state() {
        let mut e = engine(vec![product(1, 100, 4.0, false)]);
        e.filter_by_rating(4.5);
        e.initialize(data(vec![product(1, 100, 4.0, false)]));
        assert_eq!(e.all_products().len(), 1);
        assert_eq!(view_ids(&e), vec![1]);
        assert!(e.current_filter().is_default());
    }

    #[test]
    fn test_sort_scenario() {
        let mut e = engine(vec![
            product(1, 100, 4.5, true),
            product(2, 50, 4.8, false),
        ]);
        e.sort(SortKey::PriceLow);
        assert_eq!(view_ids(&e), vec![2, 1]);
        e.sort(SortKey::Featured);
        assert_eq!(view_ids(&e), vec![1, 2]);
    }

    #[test]
    fn test_featured_sort_groups_then_rating() {
        let mut e = engine(vec![
            product(1, 100, 3.0, false),
            product(2, 100, 4.0, true),
            product(3, 100, 5.0, false),
            product(4, 100, 4.9, true),
        ]);
        e.sort(SortKey::Featured);
        assert_eq!(view_ids(&e), vec![4, 2, 3, 1]);
    }

    #[test]
    fn test_sort_is_stable_for_ties() {
        let mut e = engine(vec![
            product(1, 100, 4.0, false),
            product(2, 100, 4.0, false),
            product(3, 50, 4.0, false),
        ]);
        e.sort(SortKey::PriceHigh);
        assert_eq!(view_ids(&e), vec![1, 2, 3]);
        e.sort(SortKey::PriceHigh);
        assert_eq!(view_ids(&e), vec![1, 2, 3]);
    }

    #[test]
    fn test_filter_by_category_scenario() {
        let mut e = engine(vec![
            with_category(product(1, 100, 4.0, false), "Electronics", "Laptops"),
            with_category(product(2, 100, 4.0, false), "Fashion", "Shoes"),
            with_category(product(3, 100, 4.0, false), "Electronics", "Tablets"),
            with_category(product(4, 100, 4.0, false), "Fashion", "Bags"),
            with_category(product(5, 100, 4.0, false), "Electronics", "Cameras"),
        ]);
        assert_eq!(e.filter_by_category(Some("Electronics"), None), 3);
        assert_eq!(view_ids(&e), vec![1, 3, 5]);
    }

    #[test]
    fn test_filters_combine_from_full_collection() {
        let mut e = engine(vec![
            product(1, 100, 4.0, false),
            product(2, 500, 4.8, false),
            product(3, 900, 4.9, false),
        ]);
        e.filter_by_price_range(200, Some(1000));
        assert_eq!(view_ids(&e).len(), 2);
        e.filter_by_rating(4.85);
        assert_eq!(view_ids(&e), vec![3]);
        // Widening one filter re-derives from the full set.
        e.filter_by_price_range(0, None);
        assert_eq!(view_ids(&e), vec![3]);
        e.filter_by_rating(0.0);
        assert_eq!(view_ids(&e).len(), 3);
    }

    #[test]
    fn test_search_applies_all_filters() {
        let mut a = product(1, 100, 4.0, false);
        a.name = "Wireless Mouse".to_string();
        let mut b = product(2, 900, 4.0, false);
        b.name = "Wireless Speaker".to_string();
        let mut e = engine(vec![a, b]);

        e.filter_by_price_range(0, Some(500));
        assert_eq!(e.search("wireless"), 1);
        assert_eq!(view_ids(&e), vec![1]);

        assert_eq!(e.search("  "), 1);
        assert!(e.current_filter().search.is_empty());
    }

    #[test]
    fn test_search_matches_sku() {
        let mut e = engine(vec![product(1, 100, 4.0, false), product(2, 100, 4.0, false)]);
        assert_eq!(e.search("tst-0002"), 1);
        assert_eq!(view_ids(&e), vec![2]);
    }

    #[test]
    fn test_clear_filters_restores_featured_order() {
        let mut e = engine(vec![
            product(1, 100, 3.0, false),
            product(2, 100, 4.0, true),
            product(3, 100, 5.0, false),
        ]);
        e.filter_by_rating(4.5);
        e.clear_filters();
        let page = e.get_page(1, 10);
        let order: Vec<u64> = page.items.iter().map(|p| p.id.get()).collect();
        assert_eq!(order, vec![2, 3, 1]);
        assert!(e.current_filter().is_default());
    }

    #[test]
    fn test_pages_reconstruct_view() {
        let products = (1..=23).map(|i| product(i, i as i64 * 10, 4.0, false)).collect();
        let mut e = engine(products);
        e.sort(SortKey::PriceHigh);

        let first = e.get_page(1, 10);
        assert_eq!(first.total_pages, 3);
        let mut all = Vec::new();
        for n in 1..=first.total_pages {
            let page = e.get_page(n, 10);
            assert!(page.len() <= 10);
            all.extend(page.items.into_iter().map(|p| p.id.get()));
        }
        assert_eq!(all, view_ids(&e));
        assert!(e.get_page(4, 10).is_empty());
        assert_eq!(e.current_page(), 4);
    }

    #[test]
    fn test_empty_filter_result() {
        let mut e = engine(vec![product(1, 100, 4.0, false)]);
        e.filter_by_rating(5.0);
        let page = e.get_page(1, 20);
        assert!(page.is_empty());
        assert_eq!(page.total_pages, 0);
    }

    #[test]
    fn test_highlights_ignore_filters() {
        let mut a = product(1, 100, 4.0, true);
        a.best_selling = true;
        let b = product(2, 100, 4.0, true);
        let mut c = product(3, 100, 4.0, false);
        c.new_arrival = true;
        let mut e = engine(vec![a, b, c]);
        e.filter_by_rating(5.0);

        assert_eq!(ids(&e.get_featured(8)), vec![1, 2]);
        assert_eq!(ids(&e.get_featured(1)), vec![1]);
        assert_eq!(ids(&e.get_best_selling(8)), vec![1]);
        assert_eq!(ids(&e.get_new_arrivals(8)), vec![3]);
    }

    #[test]
    fn test_related_never_pads() {
        let e = engine(vec![
            with_category(product(1, 100, 4.0, false), "Fashion", "Shoes"),
            with_category(product(2, 100, 4.0, false), "Electronics", "Laptops"),
            with_category(product(3, 100, 4.0, false), "Fashion", "Shoes"),
            with_category(product(4, 100, 4.0, false), "Fashion", "Bags"),
            with_category(product(5, 100, 4.0, false), "Fashion", "Shoes"),
        ]);
        assert_eq!(ids(&e.get_related(ProductId(5), 4)), vec![1, 3]);
        assert!(e.get_related(ProductId(99), 4).is_empty());
    }

    #[test]
    fn test_add_product_assigns_next_id() {
        let store = Arc::new(MemoryCatalogStore::new());
        let mut e = CatalogEngine::new(Arc::clone(&store));
        e.initialize(data(vec![product(3, 100, 4.0, false), product(7, 100, 4.0, false)]));

        let added = e.add_product(NewProduct {
            name: "Trail Tent".to_string(),
            category: "Sports & Outdoors".to_string(),
            subcategory: "Camping".to_string(),
            price: 4200,
            stock: 5,
            ..Default::default()
        });

        assert_eq!(added.id, ProductId(8));
        let found = e.get_by_id(ProductId(8)).unwrap();
        assert!(found.new_arrival);
        assert!(!found.featured);
        assert!(view_ids(&e).contains(&8));
        assert_eq!(store.snapshot().unwrap().len(), 3);
    }

    #[test]
    fn test_add_product_to_empty_catalog() {
        let mut e = engine(Vec::new());
        let added = e.add_product(NewProduct::default());
        assert_eq!(added.id, ProductId(1));
    }

    #[test]
    fn test_update_product() {
        let mut e = engine(vec![product(1, 100, 4.0, false)]);
        e.filter_by_price_range(0, Some(150));

        let patch = ProductPatch {
            price: Some(200),
            ..Default::default()
        };
        let updated = e.update_product(ProductId(1), &patch).unwrap();
        assert_eq!(updated.price, 200);
        assert!(view_ids(&e).is_empty());

        assert!(e.update_product(ProductId(2), &patch).is_none());
    }

    #[test]
    fn test_delete_product() {
        let store = Arc::new(MemoryCatalogStore::new());
        let mut e = CatalogEngine::new(Arc::clone(&store));
        e.initialize(data(vec![product(1, 100, 4.0, false), product(2, 100, 4.0, false)]));

        assert!(e.delete_product(ProductId(1)));
        assert!(e.get_by_id(ProductId(1)).is_none());
        assert_eq!(view_ids(&e), vec![2]);
        assert!(!e.delete_product(ProductId(1)));
        assert_eq!(store.save_count(), 1);
    }

    #[test]
    fn test_adjust_stock_allows_negative_and_skips_recompute() {
        let store = Arc::new(MemoryCatalogStore::new());
        let mut e = CatalogEngine::new(Arc::clone(&store));
        e.initialize(data(vec![product(1, 100, 4.0, false)]));
        e.filter_by_stock(true);

        let updated = e.adjust_stock(ProductId(1), -15).unwrap();
        assert_eq!(updated.stock, -5);
        // The view still holds the product until filters are re-applied.
        assert_eq!(view_ids(&e), vec![1]);
        assert_eq!(e.filtered().next().unwrap().stock, -5);
        assert_eq!(store.save_count(), 1);

        e.filter_by_stock(true);
        assert!(view_ids(&e).is_empty());
        assert!(e.adjust_stock(ProductId(2), 1).is_none());
    }

    #[test]
    fn test_failed_persistence_keeps_memory_state() {
        let store = Arc::new(MemoryCatalogStore::new());
        store.set_fail_writes(true);
        let mut e = CatalogEngine::new(Arc::clone(&store));
        e.initialize(data(vec![product(1, 100, 4.0, false)]));

        let added = e.add_product(NewProduct::default());
        assert!(e.get_by_id(added.id).is_some());
        assert!(e.delete_product(ProductId(1)));
        assert_eq!(view_ids(&e), vec![2]);
        assert!(store.snapshot().is_none());
    }

    #[test]
    fn test_subcategories_lookup() {
        let e = engine(Vec::new());
        assert_eq!(e.subcategories("Fashion").len(), 6);
        assert!(e.subcategories("Groceries").is_empty());
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn arb_product() -> impl Strategy<Value = (i64, u8, bool, i64, usize)> {
            (0i64..5_000, 0u8..=50, any::<bool>(), -3i64..20, 0usize..4)
        }

        const SUBCATEGORIES: [&str; 4] = ["Laptops", "Tablets", "Cameras", "Audio"];

        fn build(specs: &[(i64, u8, bool, i64, usize)]) -> Vec<Product> {
            specs
                .iter()
                .enumerate()
                .map(|(i, &(price, rating, featured, stock, sub))| {
                    let mut p = product(i as u64 + 1, price, f64::from(rating) / 10.0, featured);
                    p.stock = stock;
                    p.subcategory = SUBCATEGORIES[sub].to_string();
                    p
                })
                .collect()
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 200,
                ..ProptestConfig::default()
            })]

            /// Property: the view holds exactly the products matching the filter.
            #[test]
            fn view_matches_filter_exactly(
                specs in prop::collection::vec(arb_product(), 0..40),
                min in 0i64..2_500,
                span in prop::option::of(0i64..3_000),
                rating in 0u8..=50,
                in_stock in any::<bool>(),
                sub in prop::option::of(0usize..4),
            ) {
                let mut e = engine(build(&specs));
                let filter = FilterState {
                    subcategory: sub.map(|i| SUBCATEGORIES[i].to_string()),
                    price_min: min,
                    price_max: span.map(|s| min + s),
                    rating: f64::from(rating) / 10.0,
                    in_stock,
                    ..FilterState::default()
                };
                e.apply_filter(filter.clone());

                let in_view: Vec<ProductId> = e.filtered_ids();
                for p in e.filtered() {
                    prop_assert!(filter.matches(p));
                }
                for p in e.all_products() {
                    prop_assert_eq!(filter.matches(p), in_view.contains(&p.id));
                }
            }

            /// Property: concatenated pages reproduce the view.
            #[test]
            fn pages_concatenate_to_view(
                specs in prop::collection::vec(arb_product(), 0..60),
                size in 1usize..15,
                key in prop::sample::select(SortKey::ALL.to_vec()),
            ) {
                let mut e = engine(build(&specs));
                e.sort(key);
                let expected = e.filtered_ids();
                let pages = e.get_page(1, size).total_pages;
                prop_assert_eq!(pages, expected.len().div_ceil(size));

                let mut seen = Vec::new();
                for n in 1..=pages {
                    let page = e.get_page(n, size);
                    prop_assert!(page.len() <= size);
                    seen.extend(page.items.iter().map(|p| p.id));
                }
                prop_assert_eq!(seen, expected);
                prop_assert!(e.get_page(pages + 1, size).is_empty());
            }

            /// Property: featured sort puts every featured product first, each
            /// group descending by rating.
            #[test]
            fn featured_sort_orders_groups(specs in prop::collection::vec(arb_product(), 0..40)) {
                let mut e = engine(build(&specs));
                e.sort(SortKey::Featured);
                let view: Vec<&Product> = e.filtered().collect();
                for pair in view.windows(2) {
                    let (a, b) = (pair[0], pair[1]);
                    prop_assert!(a.featured >= b.featured);
                    if a.featured == b.featured {
                        prop_assert!(a.rating >= b.rating);
                    }
                }
            }

            /// Property: sorting twice by the same key changes nothing.
            #[test]
            fn sort_is_idempotent(
                specs in prop::collection::vec(arb_product(), 0..40),
                key in prop::sample::select(SortKey::ALL.to_vec()),
            ) {
                let mut e = engine(build(&specs));
                e.sort(key);
                let once = e.filtered_ids();
                e.sort(key);
                prop_assert_eq!(e.filtered_ids(), once);
            }
        }
    }
}
