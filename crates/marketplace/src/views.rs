//! View data returned to the presentation boundary.
//!
//! Line subtotals are computed from the CURRENT product price at view
//! time; only the order's total amount is a checkout-time snapshot.
//! A historical order can therefore show a total that differs from
//! the sum of its displayed subtotals. Preserved behavior.

use chrono::{DateTime, Utc};
use common::UserId;
use domain::{
    CartItemId, ItemStatus, Money, Order, OrderId, OrderItem, OrderItemId, OrderStatus,
    PaymentMethod, Product, ProductId, Unit,
};
use market_store::StoreState;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// One line of a cart view, with a live-price subtotal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLine {
    pub item_id: CartItemId,
    pub product_id: ProductId,
    pub product_name: String,
    pub unit_price: Money,
    pub unit: Unit,
    pub quantity: u32,
    pub subtotal: Money,
}

/// A customer's cart with computed totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartView {
    pub lines: Vec<CartLine>,
    pub total: Money,
}

/// Order header data shown in lists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderSummary {
    pub order_id: OrderId,
    pub customer: UserId,
    pub total_amount: Money,
    pub payment_method: PaymentMethod,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

impl OrderSummary {
    pub(crate) fn of(order: &Order) -> Self {
        Self {
            order_id: order.id(),
            customer: order.customer(),
            total_amount: order.total_amount(),
            payment_method: order.payment_method(),
            status: order.status(),
            created_at: order.created_at(),
        }
    }
}

/// One order line item with product data and a live-price subtotal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItemView {
    pub item_id: OrderItemId,
    pub product_id: ProductId,
    pub product_name: String,
    pub farmer: UserId,
    pub quantity: u32,
    pub unit_price: Money,
    pub subtotal: Money,
    pub status: ItemStatus,
}

pub(crate) fn line_item_view(state: &StoreState, item: &OrderItem) -> Result<LineItemView> {
    let product = state.product(item.product_id)?;
    Ok(LineItemView {
        item_id: item.id,
        product_id: item.product_id,
        product_name: product.name.clone(),
        farmer: product.farmer,
        quantity: item.quantity,
        unit_price: product.price,
        subtotal: product.price.multiply(item.quantity),
        status: item.status,
    })
}

/// A full order with its line items.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDetail {
    pub summary: OrderSummary,
    pub shipping_address: String,
    pub items: Vec<LineItemView>,
}

pub(crate) fn order_detail(state: &StoreState, order: &Order) -> Result<OrderDetail> {
    let items = order
        .items()
        .iter()
        .map(|item| line_item_view(state, item))
        .collect::<Result<Vec<_>>>()?;
    Ok(OrderDetail {
        summary: OrderSummary::of(order),
        shipping_address: order.shipping_address().to_string(),
        items,
    })
}

/// A line item as it appears on the farmer dashboard, tied to the
/// order that contains it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FarmerOrderLine {
    pub order_id: OrderId,
    pub order_status: OrderStatus,
    pub placed_at: DateTime<Utc>,
    pub item: LineItemView,
}

/// Farmer dashboard: own listings plus incoming order lines.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FarmerDashboard {
    pub products: Vec<Product>,
    pub incoming: Vec<FarmerOrderLine>,
}

/// Admin dashboard statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminDashboard {
    pub user_count: usize,
    pub farmer_count: usize,
    pub order_count: usize,
    /// Sum of totals across Delivered orders.
    pub revenue: Money,
}
