//! The datastore's tables and row accessors.

use std::collections::HashMap;

use common::UserId;
use domain::{Cart, Order, OrderId, OrderItemId, Product, ProductId, Profile};

use crate::error::{Result, StoreError};

/// All persistent marketplace state.
///
/// Accessors are synchronous; callers reach this through a
/// [`crate::MarketStore`] guard, which provides the transaction
/// boundary.
#[derive(Debug, Default)]
pub struct StoreState {
    profiles: HashMap<UserId, Profile>,
    products: HashMap<ProductId, Product>,
    carts: HashMap<UserId, Cart>,
    orders: HashMap<OrderId, Order>,
}

impl StoreState {
    pub fn new() -> Self {
        Self::default()
    }

    // Profiles

    pub fn profile(&self, user: UserId) -> Result<&Profile> {
        self.profiles
            .get(&user)
            .ok_or(StoreError::ProfileNotFound(user))
    }

    pub fn profile_mut(&mut self, user: UserId) -> Result<&mut Profile> {
        self.profiles
            .get_mut(&user)
            .ok_or(StoreError::ProfileNotFound(user))
    }

    /// Returns the user's profile, creating a default one on first
    /// access.
    pub fn profile_or_default(&mut self, user: UserId) -> &mut Profile {
        self.profiles.entry(user).or_insert_with(|| Profile::new(user))
    }

    pub fn insert_profile(&mut self, profile: Profile) {
        self.profiles.insert(profile.user, profile);
    }

    pub fn profiles(&self) -> impl Iterator<Item = &Profile> {
        self.profiles.values()
    }

    // Products

    pub fn product(&self, id: ProductId) -> Result<&Product> {
        self.products.get(&id).ok_or(StoreError::ProductNotFound(id))
    }

    pub fn product_mut(&mut self, id: ProductId) -> Result<&mut Product> {
        self.products
            .get_mut(&id)
            .ok_or(StoreError::ProductNotFound(id))
    }

    pub fn insert_product(&mut self, product: Product) {
        self.products.insert(product.id, product);
    }

    pub fn products(&self) -> impl Iterator<Item = &Product> {
        self.products.values()
    }

    // Carts

    /// Returns the customer's cart, if one exists yet.
    pub fn cart(&self, customer: UserId) -> Option<&Cart> {
        self.carts.get(&customer)
    }

    /// Returns the customer's cart, lazily creating an empty one on
    /// first access.
    pub fn cart_mut(&mut self, customer: UserId) -> &mut Cart {
        self.carts
            .entry(customer)
            .or_insert_with(|| Cart::new(customer))
    }

    // Orders

    pub fn order(&self, id: OrderId) -> Result<&Order> {
        self.orders.get(&id).ok_or(StoreError::OrderNotFound(id))
    }

    pub fn order_mut(&mut self, id: OrderId) -> Result<&mut Order> {
        self.orders.get_mut(&id).ok_or(StoreError::OrderNotFound(id))
    }

    pub fn insert_order(&mut self, order: Order) {
        self.orders.insert(order.id(), order);
    }

    pub fn orders(&self) -> impl Iterator<Item = &Order> {
        self.orders.values()
    }

    /// Returns all orders, most recent first.
    pub fn orders_by_recency(&self) -> Vec<&Order> {
        let mut orders: Vec<&Order> = self.orders.values().collect();
        orders.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        orders
    }

    /// Finds the order containing a line item.
    pub fn order_of_item(&self, item: OrderItemId) -> Result<&Order> {
        self.orders
            .values()
            .find(|o| o.item(item).is_some())
            .ok_or(StoreError::OrderItemNotFound(item))
    }

    /// Finds the order containing a line item, mutably.
    pub fn order_of_item_mut(&mut self, item: OrderItemId) -> Result<&mut Order> {
        self.orders
            .values_mut()
            .find(|o| o.item(item).is_some())
            .ok_or(StoreError::OrderItemNotFound(item))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::{Category, Money, StockLevel};

    #[test]
    fn test_profile_or_default_creates_once() {
        let mut state = StoreState::new();
        let user = UserId::new();

        assert!(state.profile(user).is_err());
        state.profile_or_default(user);
        assert!(state.profile(user).is_ok());

        state.profile_or_default(user).is_blocked = true;
        assert!(state.profile(user).unwrap().is_blocked);
    }

    #[test]
    fn test_cart_created_lazily() {
        let mut state = StoreState::new();
        let customer = UserId::new();

        assert!(state.cart(customer).is_none());
        assert!(state.cart_mut(customer).is_empty());
        assert!(state.cart(customer).is_some());
    }

    #[test]
    fn test_product_not_found() {
        let state = StoreState::new();
        let id = ProductId::new();
        assert_eq!(state.product(id).unwrap_err(), StoreError::ProductNotFound(id));
    }

    #[test]
    fn test_orders_by_recency() {
        let mut state = StoreState::new();
        let customer = UserId::new();
        let product = Product::new(
            UserId::new(),
            "Tomatoes",
            Category::Vegetables,
            Money::from_rupees(30),
            StockLevel::from_units(100),
            None,
        );

        for _ in 0..3 {
            let item = domain::OrderItem::new(product.id, 1);
            state.insert_order(Order::new(
                customer,
                Money::from_rupees(30),
                "14 Market Road, Mysore 570001",
                domain::PaymentMethod::CashOnDelivery,
                vec![item],
            ));
        }

        let ordered = state.orders_by_recency();
        assert_eq!(ordered.len(), 3);
        for pair in ordered.windows(2) {
            assert!(pair[0].created_at() >= pair[1].created_at());
        }
    }
}
