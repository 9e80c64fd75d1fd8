//! Cart service: the staging area before checkout.

use common::UserId;
use domain::{Adjustment, CartItemId, Money, ProductId};
use market_store::MarketStore;

use crate::error::{MarketError, Result};
use crate::gate;
use crate::views::{CartLine, CartView};

/// Manages per-customer carts.
#[derive(Clone)]
pub struct CartService {
    store: MarketStore,
}

impl CartService {
    pub fn new(store: MarketStore) -> Self {
        Self { store }
    }

    /// Adds a quantity of a product to the caller's cart.
    ///
    /// Re-adding a product already in the cart merges quantities
    /// rather than creating a duplicate line. Farmers cannot buy
    /// their own products.
    #[tracing::instrument(skip(self))]
    pub async fn add_to_cart(
        &self,
        customer: UserId,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<CartItemId> {
        self.store
            .with_write(|state| {
                gate::require_shopper(state, customer)?;
                let product = state.product(product_id)?;
                if quantity < 1 {
                    return Err(MarketError::InvalidQuantity { quantity });
                }
                if product.farmer == customer {
                    return Err(MarketError::SelfPurchase);
                }
                Ok(state.cart_mut(customer).add(product_id, quantity))
            })
            .await
    }

    /// Adjusts a cart line's quantity by one step. Decreasing a
    /// quantity-1 line removes it entirely.
    #[tracing::instrument(skip(self))]
    pub async fn adjust_quantity(
        &self,
        customer: UserId,
        item_id: CartItemId,
        direction: Adjustment,
    ) -> Result<()> {
        self.store
            .with_write(|state| {
                gate::require_shopper(state, customer)?;
                if state.cart_mut(customer).adjust(item_id, direction) {
                    Ok(())
                } else {
                    Err(MarketError::NotFound)
                }
            })
            .await
    }

    /// Removes a cart line unconditionally.
    #[tracing::instrument(skip(self))]
    pub async fn remove_item(&self, customer: UserId, item_id: CartItemId) -> Result<()> {
        self.store
            .with_write(|state| {
                gate::require_shopper(state, customer)?;
                if state.cart_mut(customer).remove(item_id) {
                    Ok(())
                } else {
                    Err(MarketError::NotFound)
                }
            })
            .await
    }

    /// Returns the caller's cart with live-price subtotals, lazily
    /// creating an empty cart on first view.
    #[tracing::instrument(skip(self))]
    pub async fn view_cart(&self, customer: UserId) -> Result<CartView> {
        self.store
            .with_write(|state| {
                gate::require_shopper(state, customer)?;
                let items = state.cart_mut(customer).items().to_vec();

                let mut lines = Vec::with_capacity(items.len());
                let mut total = Money::zero();
                for item in items {
                    let product = state.product(item.product_id)?;
                    let subtotal = product.price.multiply(item.quantity);
                    total += subtotal;
                    lines.push(CartLine {
                        item_id: item.id,
                        product_id: item.product_id,
                        product_name: product.name.clone(),
                        unit_price: product.price,
                        unit: product.unit(),
                        quantity: item.quantity,
                        subtotal,
                    });
                }
                Ok(CartView { lines, total })
            })
            .await
    }
}
