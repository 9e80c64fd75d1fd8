//! Order aggregate and its line items.

use chrono::{DateTime, Utc};
use common::UserId;
use serde::{Deserialize, Serialize};

use crate::ids::{OrderId, OrderItemId, ProductId};
use crate::money::Money;
use crate::payment::PaymentMethod;
use crate::status::{ItemStatus, OrderStatus};

/// One product-and-quantity entry within an order, with its own
/// fulfillment status.
///
/// The quantity is a snapshot taken at checkout. The price is
/// deliberately NOT snapshotted: subtotals are computed from the
/// current product price, so historical order totals can drift from
/// the subtotal a view displays today. That quirk is preserved
/// behavior, not a bug.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: OrderItemId,
    pub product_id: ProductId,
    pub quantity: u32,
    pub status: ItemStatus,
}

impl OrderItem {
    /// Creates a pending line item.
    pub fn new(product_id: ProductId, quantity: u32) -> Self {
        Self {
            id: OrderItemId::new(),
            product_id,
            quantity,
            status: ItemStatus::Pending,
        }
    }

    /// Applies `requested` if it is the legal next status; any other
    /// request is silently discarded. Returns true if the status
    /// changed.
    pub fn request_transition(&mut self, requested: ItemStatus) -> bool {
        if self.status.can_become(requested) {
            self.status = requested;
            true
        } else {
            false
        }
    }
}

/// An order: the immutable-once-created record of a purchase.
///
/// The total amount, shipping address, and payment method are fixed
/// at creation. Only the aggregate status and the line-item statuses
/// change afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    id: OrderId,
    customer: UserId,
    total_amount: Money,
    shipping_address: String,
    payment_method: PaymentMethod,
    status: OrderStatus,
    created_at: DateTime<Utc>,
    items: Vec<OrderItem>,
}

impl Order {
    /// Creates a pending order with its line items.
    pub fn new(
        customer: UserId,
        total_amount: Money,
        shipping_address: impl Into<String>,
        payment_method: PaymentMethod,
        items: Vec<OrderItem>,
    ) -> Self {
        Self {
            id: OrderId::new(),
            customer,
            total_amount,
            shipping_address: shipping_address.into(),
            payment_method,
            status: OrderStatus::Pending,
            created_at: Utc::now(),
            items,
        }
    }

    pub fn id(&self) -> OrderId {
        self.id
    }

    pub fn customer(&self) -> UserId {
        self.customer
    }

    /// Returns the total captured at checkout time.
    pub fn total_amount(&self) -> Money {
        self.total_amount
    }

    pub fn shipping_address(&self) -> &str {
        &self.shipping_address
    }

    pub fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    /// Returns a line item by ID.
    pub fn item(&self, id: OrderItemId) -> Option<&OrderItem> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Returns a mutable line item by ID.
    pub fn item_mut(&mut self, id: OrderItemId) -> Option<&mut OrderItem> {
        self.items.iter_mut().find(|i| i.id == id)
    }

    /// Derives the aggregate status from the line items: any open
    /// (Pending or Shipped) item keeps the order at Shipped; once
    /// every item is Delivered the order is Delivered.
    pub fn rollup(&self) -> OrderStatus {
        if self.items.iter().any(|i| i.status.is_open()) {
            OrderStatus::Shipped
        } else {
            OrderStatus::Delivered
        }
    }

    /// Recomputes the aggregate status from the line items.
    ///
    /// Runs after every farmer-driven item change, without regard to
    /// the current aggregate status. A Cancelled order whose items
    /// keep moving will therefore be revived; that asymmetry is
    /// preserved from the original flow.
    pub fn apply_rollup(&mut self) {
        self.status = self.rollup();
    }

    /// Customer cancellation: permitted only while Pending, otherwise
    /// a silent no-op. Returns true if the order was cancelled.
    pub fn cancel_by_customer(&mut self) -> bool {
        if self.status.can_cancel() {
            self.status = OrderStatus::Cancelled;
            true
        } else {
            false
        }
    }

    /// Admin override: sets the status directly, bypassing the item
    /// state machine and the rollup. A Pending request is ignored.
    pub fn force_status(&mut self, status: OrderStatus) -> bool {
        match status {
            OrderStatus::Cancelled | OrderStatus::Shipped | OrderStatus::Delivered => {
                self.status = status;
                true
            }
            OrderStatus::Pending => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order_with_items(statuses: &[ItemStatus]) -> Order {
        let items = statuses
            .iter()
            .map(|s| {
                let mut item = OrderItem::new(ProductId::new(), 1);
                item.status = *s;
                item
            })
            .collect();
        Order::new(
            UserId::new(),
            Money::from_rupees(100),
            "14 Market Road, Mysore 570001",
            PaymentMethod::CashOnDelivery,
            items,
        )
    }

    #[test]
    fn test_new_order_is_pending() {
        let order = order_with_items(&[ItemStatus::Pending]);
        assert_eq!(order.status(), OrderStatus::Pending);
        assert_eq!(order.items()[0].status, ItemStatus::Pending);
    }

    #[test]
    fn test_item_transition_pending_to_shipped() {
        let mut item = OrderItem::new(ProductId::new(), 2);
        assert!(item.request_transition(ItemStatus::Shipped));
        assert_eq!(item.status, ItemStatus::Shipped);
    }

    #[test]
    fn test_item_transition_illegal_requests_ignored() {
        let mut item = OrderItem::new(ProductId::new(), 2);

        // Skipping straight to Delivered is discarded.
        assert!(!item.request_transition(ItemStatus::Delivered));
        assert_eq!(item.status, ItemStatus::Pending);

        item.request_transition(ItemStatus::Shipped);
        item.request_transition(ItemStatus::Delivered);

        // Delivered is terminal; going back is discarded.
        assert!(!item.request_transition(ItemStatus::Shipped));
        assert_eq!(item.status, ItemStatus::Delivered);
    }

    #[test]
    fn test_rollup_any_open_item_means_shipped() {
        let order = order_with_items(&[ItemStatus::Delivered, ItemStatus::Shipped]);
        assert_eq!(order.rollup(), OrderStatus::Shipped);

        let order = order_with_items(&[ItemStatus::Pending, ItemStatus::Delivered]);
        assert_eq!(order.rollup(), OrderStatus::Shipped);
    }

    #[test]
    fn test_rollup_all_delivered_means_delivered() {
        let order = order_with_items(&[ItemStatus::Delivered, ItemStatus::Delivered]);
        assert_eq!(order.rollup(), OrderStatus::Delivered);
    }

    #[test]
    fn test_rollup_ignores_cancelled_state() {
        let mut order = order_with_items(&[ItemStatus::Shipped]);
        assert!(order.cancel_by_customer());
        assert_eq!(order.status(), OrderStatus::Cancelled);

        // A farmer-driven rollup still runs on a cancelled order.
        order.apply_rollup();
        assert_eq!(order.status(), OrderStatus::Shipped);
    }

    #[test]
    fn test_cancel_only_while_pending() {
        let mut order = order_with_items(&[ItemStatus::Pending]);
        assert!(order.cancel_by_customer());
        assert_eq!(order.status(), OrderStatus::Cancelled);

        // Second cancel is a no-op.
        assert!(!order.cancel_by_customer());
        assert_eq!(order.status(), OrderStatus::Cancelled);
    }

    #[test]
    fn test_cancel_noop_after_shipping() {
        let mut order = order_with_items(&[ItemStatus::Shipped]);
        order.apply_rollup();
        assert_eq!(order.status(), OrderStatus::Shipped);

        assert!(!order.cancel_by_customer());
        assert_eq!(order.status(), OrderStatus::Shipped);
    }

    #[test]
    fn test_force_status() {
        let mut order = order_with_items(&[ItemStatus::Pending]);

        assert!(order.force_status(OrderStatus::Delivered));
        assert_eq!(order.status(), OrderStatus::Delivered);
        // Item statuses are untouched by the admin override.
        assert_eq!(order.items()[0].status, ItemStatus::Pending);

        assert!(order.force_status(OrderStatus::Cancelled));
        assert_eq!(order.status(), OrderStatus::Cancelled);

        // Forcing back to Pending is not an admin action.
        assert!(!order.force_status(OrderStatus::Pending));
        assert_eq!(order.status(), OrderStatus::Cancelled);
    }

    #[test]
    fn test_serialization_roundtrip() {
        let order = order_with_items(&[ItemStatus::Pending, ItemStatus::Shipped]);
        let json = serde_json::to_string(&order).unwrap();
        let deserialized: Order = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.id(), order.id());
        assert_eq!(deserialized.items(), order.items());
        assert_eq!(deserialized.total_amount(), order.total_amount());
    }
}
