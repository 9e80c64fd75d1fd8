//! Order lifecycle and inventory engine for a farm-to-table
//! marketplace.
//!
//! Customers browse a catalog of farmer listings, build a cart, and
//! check out into an order whose line items are fulfilled
//! independently by each farmer involved. The order's aggregate
//! status is rolled up from its line items; admins can moderate
//! accounts and override order statuses.
//!
//! All state lives in a shared [`market_store::MarketStore`]; every
//! operation runs inside a single store guard, which is what makes
//! checkout (stock decrement + order creation + cart clearing)
//! atomic.

pub mod admin;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod error;
pub mod gate;
pub mod orders;
pub mod profiles;
pub mod views;

pub use admin::AdminService;
pub use cart::CartService;
pub use catalog::{CatalogService, ProductSpec};
pub use checkout::CheckoutService;
pub use error::{MarketError, Result};
pub use orders::OrderService;
pub use profiles::ProfileService;
pub use views::{
    AdminDashboard, CartLine, CartView, FarmerDashboard, FarmerOrderLine, LineItemView,
    OrderDetail, OrderSummary,
};

use market_store::MarketStore;

/// All marketplace services over one shared store.
#[derive(Clone)]
pub struct Marketplace {
    pub profiles: ProfileService,
    pub catalog: CatalogService,
    pub cart: CartService,
    pub checkout: CheckoutService,
    pub orders: OrderService,
    pub admin: AdminService,
    store: MarketStore,
}

impl Marketplace {
    /// Creates a marketplace over a fresh, empty store.
    pub fn new() -> Self {
        Self::with_store(MarketStore::new())
    }

    /// Creates a marketplace over an existing store.
    pub fn with_store(store: MarketStore) -> Self {
        Self {
            profiles: ProfileService::new(store.clone()),
            catalog: CatalogService::new(store.clone()),
            cart: CartService::new(store.clone()),
            checkout: CheckoutService::new(store.clone()),
            orders: OrderService::new(store.clone()),
            admin: AdminService::new(store.clone()),
            store,
        }
    }

    /// The underlying store, shared by every service.
    pub fn store(&self) -> &MarketStore {
        &self.store
    }
}

impl Default for Marketplace {
    fn default() -> Self {
        Self::new()
    }
}
