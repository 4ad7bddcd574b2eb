//! Order placement across the cart, order log and catalog.

use crate::{StorageManager, StoreResult};
use storefront_commerce::cart::{
    check_availability, find_coupon, Cart, CartSummary, Coupon, ShippingPolicy,
};
use storefront_commerce::catalog::{CatalogEngine, CatalogStore};
use storefront_commerce::checkout::{Customer, Order, OrderDraft};
use storefront_commerce::{CommerceError, CommerceResult, Currency};
use tracing::{info, warn};

/// Pricing rules applied at checkout.
#[derive(Debug, Clone, Copy)]
pub struct Checkout<'a> {
    pub policy: ShippingPolicy,
    pub coupons: &'a [Coupon],
    pub currency: Currency,
}

impl<'a> Checkout<'a> {
    pub fn new(policy: ShippingPolicy, coupons: &'a [Coupon], currency: Currency) -> Self {
        Self {
            policy,
            coupons,
            currency,
        }
    }

    /// Price `cart`, applying `coupon_code` when given.
    ///
    /// A blank code counts as no coupon; an unknown one is an error.
    pub fn summarize(&self, cart: &Cart, coupon_code: Option<&str>) -> CommerceResult<CartSummary> {
        let coupon = coupon_code
            .filter(|code| !code.trim().is_empty())
            .map(|code| find_coupon(self.coupons, code))
            .transpose()?;
        CartSummary::calculate(cart, &self.policy, coupon, self.currency)
    }

    /// Turn the stored cart into a pending order.
    ///
    /// Validates the customer and cart, checks every line against current
    /// stock, records the order, takes the ordered quantities out of stock and
    /// empties the cart.
    ///
    /// Once the order is recorded the call succeeds; a cart that cannot be
    /// emptied is only logged.
    pub fn place_order<S: CatalogStore>(
        &self,
        storage: &StorageManager,
        engine: &mut CatalogEngine<S>,
        customer: Customer,
        coupon_code: Option<&str>,
    ) -> StoreResult<Order> {
        let cart = storage.cart();
        customer.validate()?;
        if cart.is_empty() {
            return Err(CommerceError::EmptyCart.into());
        }

        for item in cart.items() {
            let product = engine
                .get_by_id(item.id())
                .ok_or(CommerceError::ProductNotFound(item.id()))?;
            check_availability(product, item.quantity)?;
        }

        let summary = self.summarize(&cart, coupon_code)?;
        let draft = OrderDraft::new(customer, &cart, &summary)?;
        let order = storage.save_order(draft)?;

        for item in &order.items {
            engine.adjust_stock(item.id(), -item.quantity);
        }
        if let Err(e) = storage.clear_cart() {
            warn!(order_id = %order.id, error = %e, "order placed but cart not cleared");
        }

        info!(
            order_id = %order.id,
            total = order.total,
            coupon = order.coupon_code.as_deref().unwrap_or(""),
            "order placed"
        );
        Ok(order)
    }

    /// Cancel an order and return its quantities to stock.
    pub fn cancel_order<S: CatalogStore>(
        &self,
        storage: &StorageManager,
        engine: &mut CatalogEngine<S>,
        order_id: &str,
    ) -> StoreResult<Order> {
        let order = storage.cancel_order(order_id)?;
        for item in &order.items {
            if engine.adjust_stock(item.id(), item.quantity).is_none() {
                warn!(order_id, product_id = %item.id(), "cancelled item no longer in catalog");
            }
        }
        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{customer, product};
    use crate::{Cache, StoreError};
    use storefront_commerce::cart::default_coupons;
    use storefront_commerce::catalog::CatalogData;
    use storefront_commerce::checkout::OrderStatus;
    use storefront_commerce::ProductId;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    struct Fixture {
        storage: StorageManager,
        engine: CatalogEngine<crate::ProductStore>,
        coupons: Vec<Coupon>,
    }

    fn fixture() -> Fixture {
        let storage = StorageManager::new(Cache::open_default());
        storage.initialize().unwrap();
        let mut engine = CatalogEngine::new(storage.product_store());
        engine.initialize(CatalogData {
            products: vec![product(1, 1000), product(2, 250)],
            categories: Vec::new(),
        });
        Fixture {
            storage,
            engine,
            coupons: default_coupons(),
        }
    }

    #[test]
    fn test_place_order() {
        let mut f = fixture();
        let checkout = Checkout::new(ShippingPolicy::default(), &f.coupons, Currency::BDT);
        let p1 = f.engine.get_by_id(ProductId(1)).unwrap().clone();
        f.storage.add_to_cart(&p1, 3).unwrap();

        let order = checkout
            .place_order(&f.storage, &mut f.engine, customer(), Some("welcome10"))
            .unwrap();

        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.subtotal, 3000);
        assert_eq!(order.coupon_code.as_deref(), Some("WELCOME10"));
        assert_eq!(order.coupon_discount, 300);
        assert_eq!(order.shipping, 0);
        assert_eq!(order.total, 2700);

        assert_eq!(f.engine.get_by_id(ProductId(1)).unwrap().stock, 7);
        assert!(f.storage.cart().is_empty());
        assert_eq!(f.storage.orders().len(), 1);
        // Stock change is persisted with the product snapshot.
        let stored = f.storage.stored_products().unwrap();
        assert_eq!(stored[0].stock, 7);
    }

    #[test]
    fn test_empty_cart_rejected() {
        let mut f = fixture();
        let checkout = Checkout::new(ShippingPolicy::default(), &f.coupons, Currency::BDT);
        let err = checkout
            .place_order(&f.storage, &mut f.engine, customer(), None)
            .unwrap_err();
        assert!(matches!(err, StoreError::Commerce(CommerceError::EmptyCart)));
    }

    #[test]
    fn test_invalid_customer_rejected() {
        let mut f = fixture();
        let checkout = Checkout::new(ShippingPolicy::default(), &f.coupons, Currency::BDT);
        let p = f.engine.get_by_id(ProductId(2)).unwrap().clone();
        f.storage.add_to_cart(&p, 1).unwrap();

        let mut c = customer();
        c.email = "nobody".to_string();
        let err = checkout
            .place_order(&f.storage, &mut f.engine, c, None)
            .unwrap_err();
        assert!(matches!(err, StoreError::Commerce(CommerceError::ValidationError(_))));
        assert_eq!(f.storage.cart_item_count(), 1);
        assert!(f.storage.orders().is_empty());
    }

    #[test]
    fn test_stock_checked_against_live_catalog() {
        let mut f = fixture();
        let checkout = Checkout::new(ShippingPolicy::default(), &f.coupons, Currency::BDT);
        let p = f.engine.get_by_id(ProductId(2)).unwrap().clone();
        f.storage.add_to_cart(&p, 5).unwrap();
        f.engine.adjust_stock(ProductId(2), -8);

        let err = checkout
            .place_order(&f.storage, &mut f.engine, customer(), None)
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::Commerce(CommerceError::InsufficientStock { available: 2, .. })
        ));
    }

    /// Memory backend whose cart writes fail once armed.
    struct CartWritesFail {
        inner: crate::MemoryBackend,
        armed: Arc<AtomicBool>,
    }

    impl crate::KvBackend for CartWritesFail {
        fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &[u8]) -> StoreResult<()> {
            if key == "ecommerce_cart" && self.armed.load(Ordering::SeqCst) {
                return Err(StoreError::StoreError("disk full".to_string()));
            }
            self.inner.set(key, value)
        }

        fn delete(&self, key: &str) -> StoreResult<()> {
            self.inner.delete(key)
        }

        fn keys(&self) -> StoreResult<Vec<String>> {
            self.inner.keys()
        }
    }

    #[test]
    fn test_order_kept_when_cart_not_cleared() {
        let armed = Arc::new(AtomicBool::new(false));
        let storage = StorageManager::new(Cache::with_backend(CartWritesFail {
            inner: crate::MemoryBackend::new(),
            armed: armed.clone(),
        }));
        storage.initialize().unwrap();
        let mut engine = CatalogEngine::new(storage.product_store());
        engine.initialize(CatalogData {
            products: vec![product(1, 1000)],
            categories: Vec::new(),
        });
        let coupons = default_coupons();
        let checkout = Checkout::new(ShippingPolicy::default(), &coupons, Currency::BDT);

        let p = engine.get_by_id(ProductId(1)).unwrap().clone();
        storage.add_to_cart(&p, 2).unwrap();
        armed.store(true, Ordering::SeqCst);

        let order = checkout
            .place_order(&storage, &mut engine, customer(), None)
            .unwrap();
        assert_eq!(storage.orders().len(), 1);
        assert_eq!(storage.orders()[0].id, order.id);
        assert_eq!(engine.get_by_id(ProductId(1)).unwrap().stock, 8);
        // The stale cart is still there but the order is not repeated.
        assert_eq!(storage.cart_item_count(), 2);
    }

    #[test]
    fn test_cancel_restocks() {
        let mut f = fixture();
        let checkout = Checkout::new(ShippingPolicy::default(), &f.coupons, Currency::BDT);
        let p = f.engine.get_by_id(ProductId(2)).unwrap().clone();
        f.storage.add_to_cart(&p, 4).unwrap();
        let order = checkout
            .place_order(&f.storage, &mut f.engine, customer(), None)
            .unwrap();
        assert_eq!(f.engine.get_by_id(ProductId(2)).unwrap().stock, 6);

        let cancelled = checkout
            .cancel_order(&f.storage, &mut f.engine, order.id.as_str())
            .unwrap();
        assert_eq!(cancelled.status, OrderStatus::Cancelled);
        assert_eq!(f.engine.get_by_id(ProductId(2)).unwrap().stock, 10);

        // A second cancellation is refused and stock stays put.
        let err = checkout
            .cancel_order(&f.storage, &mut f.engine, order.id.as_str())
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::Commerce(CommerceError::InvalidStatusTransition { .. })
        ));
        assert_eq!(f.engine.get_by_id(ProductId(2)).unwrap().stock, 10);
    }

    #[test]
    fn test_unknown_coupon() {
        let f = fixture();
        let checkout = Checkout::new(ShippingPolicy::default(), &f.coupons, Currency::BDT);
        let cart = f.storage.cart();
        assert!(matches!(
            checkout.summarize(&cart, Some("BOGUS")),
            Err(CommerceError::InvalidCoupon(_))
        ));
        assert!(checkout.summarize(&cart, Some("  ")).unwrap().coupon_code.is_none());
    }
}
