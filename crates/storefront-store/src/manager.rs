//! Storefront state persisted in the key-value cache.
//!
//! Read paths never fail: a missing or unreadable value yields the empty
//! default and a warning. Write paths return the backend error so callers can
//! report it.

use crate::cache_key;
use crate::keys;
use crate::session::{AdminSession, NewUser, User};
use crate::{Cache, StoreResult};
use chrono::Utc;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use storefront_commerce::cart::{Cart, CartItem};
use storefront_commerce::catalog::{CatalogStore, Product};
use storefront_commerce::checkout::{Order, OrderDraft, OrderStatus};
use storefront_commerce::wishlist::Wishlist;
use storefront_commerce::{CommerceError, CommerceResult, OrderId, ProductId, UserId};
use tracing::{debug, info, warn};

/// Cart contents after a mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartUpdate {
    pub items: Vec<CartItem>,
    /// Sum of quantities.
    pub count: i64,
}

impl CartUpdate {
    fn from_cart(cart: &Cart) -> Self {
        Self {
            items: cart.items().to_vec(),
            count: cart.item_count(),
        }
    }
}

/// Receives every cart change made through a [`StorageManager`].
pub trait CartObserver {
    fn cart_updated(&self, update: &CartUpdate);
}

impl<F: Fn(&CartUpdate)> CartObserver for F {
    fn cart_updated(&self, update: &CartUpdate) {
        self(update)
    }
}

/// Typed access to the cart, wishlist, orders, users, admin session and
/// product snapshot.
pub struct StorageManager {
    cache: Cache,
    namespace: String,
    observers: Vec<Box<dyn CartObserver>>,
}

impl std::fmt::Debug for StorageManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageManager")
            .field("namespace", &self.namespace)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl StorageManager {
    /// Create a manager using the default key namespace.
    pub fn new(cache: Cache) -> Self {
        Self::with_namespace(cache, keys::NAMESPACE)
    }

    /// Create a manager whose keys are `<namespace>_<name>`.
    pub fn with_namespace(cache: Cache, namespace: impl Into<String>) -> Self {
        Self {
            cache,
            namespace: namespace.into(),
            observers: Vec::new(),
        }
    }

    pub fn cache(&self) -> &Cache {
        &self.cache
    }

    /// Full key for `name`.
    pub fn key(&self, name: &str) -> String {
        cache_key!(self.namespace.as_str(), name)
    }

    /// Create empty cart, order, user and wishlist lists where absent.
    pub fn initialize(&self) -> StoreResult<()> {
        for name in [keys::CART, keys::ORDERS, keys::USERS, keys::WISHLIST] {
            let key = self.key(name);
            if !self.cache.exists(&key)? {
                self.cache.set(&key, &Vec::<()>::new())?;
                debug!(key = %key, "initialized empty list");
            }
        }
        Ok(())
    }

    /// Register a cart observer.
    pub fn subscribe(&mut self, observer: impl CartObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    fn read<T: DeserializeOwned>(&self, name: &str) -> Option<T> {
        let key = self.key(name);
        match self.cache.get(&key) {
            Ok(value) => value,
            Err(e) => {
                warn!(key = %key, error = %e, "ignoring unreadable stored value");
                None
            }
        }
    }

    fn write<T: Serialize + ?Sized>(&self, name: &str, value: &T) -> StoreResult<()> {
        self.cache.set(&self.key(name), value)
    }

    // ----- Cart -----

    pub fn cart(&self) -> Cart {
        self.read(keys::CART).unwrap_or_default()
    }

    /// Persist `cart` and notify observers.
    pub fn save_cart(&self, cart: &Cart) -> StoreResult<CartUpdate> {
        self.write(keys::CART, cart)?;
        let update = CartUpdate::from_cart(cart);
        debug!(lines = cart.unique_item_count(), count = update.count, "cart saved");
        for observer in &self.observers {
            observer.cart_updated(&update);
        }
        Ok(update)
    }

    /// Add `quantity` of `product`, merging into an existing line.
    pub fn add_to_cart(&self, product: &Product, quantity: i64) -> StoreResult<CartUpdate> {
        let mut cart = self.cart();
        cart.add_item(product, quantity, Utc::now())?;
        self.save_cart(&cart)
    }

    pub fn remove_from_cart(&self, product_id: ProductId) -> StoreResult<CartUpdate> {
        let mut cart = self.cart();
        cart.remove_item(product_id);
        self.save_cart(&cart)
    }

    /// Set a line's quantity, clamped to at least 1. Unknown ids change nothing.
    pub fn update_cart_item_quantity(
        &self,
        product_id: ProductId,
        quantity: i64,
    ) -> StoreResult<CartUpdate> {
        let mut cart = self.cart();
        if cart.set_quantity(product_id, quantity) {
            self.save_cart(&cart)
        } else {
            Ok(CartUpdate::from_cart(&cart))
        }
    }

    pub fn clear_cart(&self) -> StoreResult<CartUpdate> {
        self.save_cart(&Cart::new())
    }

    /// Sum of `price * quantity` in the stored cart.
    pub fn cart_total(&self) -> i64 {
        self.cart().total()
    }

    /// Sum of quantities in the stored cart.
    pub fn cart_item_count(&self) -> i64 {
        self.cart().item_count()
    }

    // ----- Wishlist -----

    pub fn wishlist(&self) -> Wishlist {
        self.read(keys::WISHLIST).unwrap_or_default()
    }

    /// Add `product` unless already wishlisted.
    pub fn add_to_wishlist(&self, product: &Product) -> StoreResult<Wishlist> {
        let mut wishlist = self.wishlist();
        if wishlist.add(product, Utc::now()) {
            self.write(keys::WISHLIST, &wishlist)?;
        }
        Ok(wishlist)
    }

    pub fn remove_from_wishlist(&self, product_id: ProductId) -> StoreResult<Wishlist> {
        let mut wishlist = self.wishlist();
        wishlist.remove(product_id);
        self.write(keys::WISHLIST, &wishlist)?;
        Ok(wishlist)
    }

    pub fn is_in_wishlist(&self, product_id: ProductId) -> bool {
        self.wishlist().contains(product_id)
    }

    /// Add or remove `product`. Returns whether it is now wishlisted.
    pub fn toggle_wishlist(&self, product: &Product) -> StoreResult<bool> {
        let mut wishlist = self.wishlist();
        let added = wishlist.toggle(product, Utc::now());
        self.write(keys::WISHLIST, &wishlist)?;
        Ok(added)
    }

    // ----- Orders -----

    /// Record `draft` as a new pending order.
    pub fn save_order(&self, draft: OrderDraft) -> StoreResult<Order> {
        let mut orders = self.orders();
        let now = Utc::now();
        let mut millis = now.timestamp_millis();
        while orders.iter().any(|o| o.id == OrderId::from_millis(millis)) {
            millis += 1;
        }

        let order = draft.into_order(OrderId::from_millis(millis), now);
        orders.push(order.clone());
        self.write(keys::ORDERS, &orders)?;
        info!(order_id = %order.id, total = order.total, items = order.item_count(), "order saved");
        Ok(order)
    }

    pub fn orders(&self) -> Vec<Order> {
        self.read(keys::ORDERS).unwrap_or_default()
    }

    pub fn order_by_id(&self, id: &str) -> Option<Order> {
        self.orders().into_iter().find(|o| o.id.as_str() == id)
    }

    /// Set an order's status. Returns `None` for an unknown id.
    pub fn update_order_status(
        &self,
        id: &str,
        status: OrderStatus,
    ) -> StoreResult<Option<Order>> {
        let mut orders = self.orders();
        let Some(order) = orders.iter_mut().find(|o| o.id.as_str() == id) else {
            return Ok(None);
        };
        order.set_status(status, Utc::now());
        let updated = order.clone();
        self.write(keys::ORDERS, &orders)?;
        info!(order_id = %id, status = %status, "order status updated");
        Ok(Some(updated))
    }

    /// Cancel an order unless it is delivered or already cancelled.
    pub fn cancel_order(&self, id: &str) -> StoreResult<Order> {
        let mut orders = self.orders();
        let order = orders
            .iter_mut()
            .find(|o| o.id.as_str() == id)
            .ok_or_else(|| CommerceError::OrderNotFound(id.to_string()))?;
        order.cancel(Utc::now())?;
        let cancelled = order.clone();
        self.write(keys::ORDERS, &orders)?;
        info!(order_id = %id, "order cancelled");
        Ok(cancelled)
    }

    // ----- Products -----

    /// A [`CatalogStore`] writing the admin product snapshot.
    pub fn product_store(&self) -> ProductStore {
        ProductStore {
            cache: self.cache.clone(),
            key: self.key(keys::PRODUCTS),
        }
    }

    /// The saved admin snapshot, if any.
    pub fn stored_products(&self) -> Option<Vec<Product>> {
        self.read(keys::PRODUCTS)
    }

    // ----- Admin session -----

    /// Start an admin session for `username`.
    pub fn set_admin_session(&self, username: &str) -> StoreResult<AdminSession> {
        let session = AdminSession::start(username, Utc::now());
        self.write(keys::ADMIN_SESSION, &session)?;
        info!(username, "admin session started");
        Ok(session)
    }

    pub fn admin_session(&self) -> Option<AdminSession> {
        self.read(keys::ADMIN_SESSION)
    }

    pub fn clear_admin_session(&self) -> StoreResult<()> {
        self.cache.delete(&self.key(keys::ADMIN_SESSION))
    }

    pub fn is_admin_logged_in(&self) -> bool {
        self.admin_session().is_some()
    }

    /// The admin session, or a validation error when nobody is logged in.
    pub fn require_admin(&self) -> CommerceResult<AdminSession> {
        self.admin_session().ok_or_else(|| {
            CommerceError::ValidationError("admin login required".to_string())
        })
    }

    // ----- Users -----

    /// Register a shopper with a fresh `USR<millis>` id.
    pub fn save_user(&self, user: NewUser) -> StoreResult<User> {
        let mut users = self.users();
        let mut millis = Utc::now().timestamp_millis();
        while users.iter().any(|u| u.id == UserId::from_millis(millis)) {
            millis += 1;
        }
        let user = User::from_new(user, UserId::from_millis(millis), Utc::now());
        users.push(user.clone());
        self.write(keys::USERS, &users)?;
        Ok(user)
    }

    pub fn users(&self) -> Vec<User> {
        self.read(keys::USERS).unwrap_or_default()
    }

    pub fn current_user(&self) -> Option<User> {
        self.read(keys::CURRENT_USER)
    }

    pub fn set_current_user(&self, user: &User) -> StoreResult<()> {
        self.write(keys::CURRENT_USER, user)
    }

    pub fn clear_current_user(&self) -> StoreResult<()> {
        self.cache.delete(&self.key(keys::CURRENT_USER))
    }
}

/// Product snapshot persistence for the catalog engine.
#[derive(Debug, Clone)]
pub struct ProductStore {
    cache: Cache,
    key: String,
}

impl CatalogStore for ProductStore {
    fn save_products(&self, products: &[Product]) -> CommerceResult<()> {
        self.cache
            .set(&self.key, products)
            .map_err(CommerceError::from)
    }

    fn load_products(&self) -> CommerceResult<Option<Vec<Product>>> {
        self.cache
            .get(&self.key)
            .map_err(CommerceError::from)
    }
}
