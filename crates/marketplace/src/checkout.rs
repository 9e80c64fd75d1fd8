//! Checkout: turns a cart into an order, atomically.

use common::UserId;
use domain::{Money, Order, OrderId, OrderItem, PaymentMethod, validate_address};
use market_store::MarketStore;

use crate::error::{MarketError, Result};
use crate::gate;

/// Creates orders from carts.
///
/// The whole checkout runs under one write guard: either the order,
/// its line items, every stock decrement, and the cart clearing all
/// commit, or none of them do. All preconditions are checked before
/// the first mutation.
#[derive(Clone)]
pub struct CheckoutService {
    store: MarketStore,
}

impl CheckoutService {
    pub fn new(store: MarketStore) -> Self {
        Self { store }
    }

    /// Attempts to check out the caller's cart.
    ///
    /// Preconditions, checked in order with the first failure
    /// reported: non-empty cart; well-formed shipping address; a
    /// payment method selected; the method is cash on delivery
    /// (online payment is rejected, leaving the cart intact); and
    /// sufficient stock for every line.
    #[tracing::instrument(skip(self, shipping_address))]
    pub async fn checkout(
        &self,
        customer: UserId,
        shipping_address: &str,
        payment_method: Option<PaymentMethod>,
    ) -> Result<OrderId> {
        let address = shipping_address.trim().to_string();

        self.store
            .with_write(|state| {
                gate::require_shopper(state, customer)?;

                let cart_items = match state.cart(customer) {
                    Some(cart) if !cart.is_empty() => cart.items().to_vec(),
                    _ => return Err(MarketError::EmptyCart),
                };

                validate_address(&address)?;

                let payment = payment_method.ok_or(MarketError::PaymentMethodRequired)?;
                if payment == PaymentMethod::Online {
                    // Rejected as "not yet available"; the cart is
                    // preserved so the customer can retry with COD.
                    return Err(MarketError::UnsupportedPayment);
                }

                // Stock sufficiency and total, computed before any
                // mutation. `new_stock` carries the post-decrement
                // levels so the write phase below cannot fail.
                let mut total = Money::zero();
                let mut decrements = Vec::with_capacity(cart_items.len());
                for item in &cart_items {
                    let product = state.product(item.product_id)?;
                    let Some(new_stock) = product.stock.checked_sub_units(item.quantity) else {
                        return Err(MarketError::InsufficientStock {
                            product: product.name.clone(),
                            available: product.stock,
                        });
                    };
                    total += product.price.multiply(item.quantity);
                    decrements.push((item.product_id, new_stock));
                }

                // Write phase: still under the same guard, so the
                // levels read above cannot have moved.
                for (product_id, new_stock) in decrements {
                    state.product_mut(product_id)?.stock = new_stock;
                }

                let items = cart_items
                    .iter()
                    .map(|i| OrderItem::new(i.product_id, i.quantity))
                    .collect();
                let order = Order::new(customer, total, address, payment, items);
                let order_id = order.id();
                state.insert_order(order);
                state.cart_mut(customer).clear();

                metrics::counter!("orders_placed_total").increment(1);
                tracing::info!(order = %order_id, total = %total, "order placed");
                Ok(order_id)
            })
            .await
    }
}
