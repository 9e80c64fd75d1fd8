//! Order lifecycle: customer history and cancellation, farmer
//! fulfillment, and the status rollup that ties them together.

use common::UserId;
use domain::{ItemStatus, OrderId, OrderItemId};
use market_store::MarketStore;

use crate::error::{MarketError, Result};
use crate::gate;
use crate::views::{self, FarmerDashboard, FarmerOrderLine, OrderDetail, OrderSummary};

/// Order queries and status changes for customers and farmers.
#[derive(Clone)]
pub struct OrderService {
    store: MarketStore,
}

impl OrderService {
    pub fn new(store: MarketStore) -> Self {
        Self { store }
    }

    // Customer side

    /// The caller's orders, most recent first.
    #[tracing::instrument(skip(self))]
    pub async fn customer_orders(&self, customer: UserId) -> Result<Vec<OrderSummary>> {
        self.store
            .with_read(|state| {
                gate::require_shopper(state, customer)?;
                Ok(state
                    .orders_by_recency()
                    .into_iter()
                    .filter(|o| o.customer() == customer)
                    .map(OrderSummary::of)
                    .collect())
            })
            .await
    }

    /// A single order with its line items. Someone else's order is
    /// reported as not found.
    #[tracing::instrument(skip(self))]
    pub async fn customer_order_detail(
        &self,
        customer: UserId,
        order_id: OrderId,
    ) -> Result<OrderDetail> {
        self.store
            .with_read(|state| {
                gate::require_shopper(state, customer)?;
                let order = state.order(order_id)?;
                if order.customer() != customer {
                    return Err(MarketError::NotFound);
                }
                views::order_detail(state, order)
            })
            .await
    }

    /// Cancels the caller's order.
    ///
    /// Only a still-Pending order actually cancels; anything further
    /// along is left untouched, without an error. Stock is not
    /// restored on cancellation.
    #[tracing::instrument(skip(self))]
    pub async fn cancel_order(&self, customer: UserId, order_id: OrderId) -> Result<()> {
        self.store
            .with_write(|state| {
                gate::require_shopper(state, customer)?;
                let order = state.order_mut(order_id)?;
                if order.customer() != customer {
                    return Err(MarketError::NotFound);
                }
                if order.cancel_by_customer() {
                    metrics::counter!("orders_cancelled_total").increment(1);
                    tracing::info!(order = %order_id, "order cancelled");
                }
                Ok(())
            })
            .await
    }

    // Farmer side

    /// Moves one of the farmer's line items along its status chain
    /// (Pending → Shipped → Delivered).
    ///
    /// An illegal request is silently discarded, but the order-level
    /// rollup runs either way. Items belonging to other farmers are
    /// reported as not found.
    #[tracing::instrument(skip(self))]
    pub async fn update_item_status(
        &self,
        farmer: UserId,
        item_id: OrderItemId,
        requested: ItemStatus,
    ) -> Result<()> {
        self.store
            .with_write(|state| {
                gate::require_farmer(state, farmer)?;

                // Ownership check before taking the mutable borrow.
                let owner = {
                    let order = state.order_of_item(item_id)?;
                    let item = order.item(item_id).ok_or(MarketError::NotFound)?;
                    state.product(item.product_id)?.farmer
                };
                if owner != farmer {
                    return Err(MarketError::NotFound);
                }

                let order = state.order_of_item_mut(item_id)?;
                let changed = order
                    .item_mut(item_id)
                    .ok_or(MarketError::NotFound)?
                    .request_transition(requested);
                order.apply_rollup();

                if changed {
                    metrics::counter!("line_items_transitioned_total").increment(1);
                    tracing::info!(item = %item_id, status = ?requested, "line item updated");
                }
                Ok(())
            })
            .await
    }

    /// Orders containing at least one of the farmer's line items,
    /// most recent first.
    #[tracing::instrument(skip(self))]
    pub async fn farmer_orders(&self, farmer: UserId) -> Result<Vec<OrderSummary>> {
        self.store
            .with_read(|state| {
                gate::require_farmer(state, farmer)?;
                let mut summaries = Vec::new();
                for order in state.orders_by_recency() {
                    let mine = order.items().iter().any(|item| {
                        state
                            .product(item.product_id)
                            .is_ok_and(|p| p.farmer == farmer)
                    });
                    if mine {
                        summaries.push(OrderSummary::of(order));
                    }
                }
                Ok(summaries)
            })
            .await
    }

    /// An order restricted to the farmer's own line items. An order
    /// with none of the farmer's items is reported as not found.
    #[tracing::instrument(skip(self))]
    pub async fn farmer_order_detail(
        &self,
        farmer: UserId,
        order_id: OrderId,
    ) -> Result<OrderDetail> {
        self.store
            .with_read(|state| {
                gate::require_farmer(state, farmer)?;
                let order = state.order(order_id)?;
                let mut detail = views::order_detail(state, order)?;
                detail.items.retain(|item| item.farmer == farmer);
                if detail.items.is_empty() {
                    return Err(MarketError::NotFound);
                }
                Ok(detail)
            })
            .await
    }

    /// The farmer dashboard: own listings plus incoming order lines.
    /// Requires admin verification.
    #[tracing::instrument(skip(self))]
    pub async fn farmer_dashboard(&self, farmer: UserId) -> Result<FarmerDashboard> {
        self.store
            .with_read(|state| {
                gate::require_verified_farmer(state, farmer)?;

                let mut products: Vec<_> = state
                    .products()
                    .filter(|p| p.farmer == farmer)
                    .cloned()
                    .collect();
                products.sort_by(|a, b| b.created_at.cmp(&a.created_at));

                let mut incoming = Vec::new();
                for order in state.orders_by_recency() {
                    for item in order.items() {
                        let owned = state
                            .product(item.product_id)
                            .is_ok_and(|p| p.farmer == farmer);
                        if owned {
                            incoming.push(FarmerOrderLine {
                                order_id: order.id(),
                                order_status: order.status(),
                                placed_at: order.created_at(),
                                item: views::line_item_view(state, item)?,
                            });
                        }
                    }
                }
                Ok(FarmerDashboard { products, incoming })
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::CartService;
    use crate::catalog::{CatalogService, ProductSpec};
    use crate::checkout::CheckoutService;
    use crate::profiles::ProfileService;
    use domain::{Category, Money, OrderStatus, PaymentMethod, ProductId, Role, StockLevel};

    const ADDRESS: &str = "12 Main Street 560001";

    struct Fixture {
        store: MarketStore,
        orders: OrderService,
        customer: UserId,
        farmer: UserId,
        other_farmer: UserId,
        product: ProductId,
        other_product: ProductId,
    }

    impl Fixture {
        /// Places an order for one unit of each product.
        async fn place_order(&self) -> OrderId {
            let cart = CartService::new(self.store.clone());
            cart.add_to_cart(self.customer, self.product, 1)
                .await
                .unwrap();
            cart.add_to_cart(self.customer, self.other_product, 1)
                .await
                .unwrap();
            CheckoutService::new(self.store.clone())
                .checkout(self.customer, ADDRESS, Some(PaymentMethod::CashOnDelivery))
                .await
                .unwrap()
        }

        async fn order_status(&self, order_id: OrderId) -> OrderStatus {
            self.store
                .with_read(|state| state.order(order_id).map(|o| o.status()))
                .await
                .unwrap()
        }

        async fn item_of(&self, order_id: OrderId, product: ProductId) -> OrderItemId {
            self.store
                .with_read(|state| {
                    state
                        .order(order_id)
                        .unwrap()
                        .items()
                        .iter()
                        .find(|i| i.product_id == product)
                        .unwrap()
                        .id
                })
                .await
        }
    }

    async fn fixture() -> Fixture {
        let store = MarketStore::new();
        let profiles = ProfileService::new(store.clone());
        let customer = UserId::new();
        let farmer = UserId::new();
        let other_farmer = UserId::new();
        profiles.register(customer, Role::Customer).await;
        profiles.register(farmer, Role::Farmer).await;
        profiles.register(other_farmer, Role::Farmer).await;

        let catalog = CatalogService::new(store.clone());
        let product = catalog
            .add_product(
                farmer,
                ProductSpec {
                    name: "Tomatoes".to_string(),
                    category: Category::Vegetables,
                    price: Money::from_rupees(30),
                    stock: StockLevel::from_units(20),
                    harvest_date: None,
                },
            )
            .await
            .unwrap();
        let other_product = catalog
            .add_product(
                other_farmer,
                ProductSpec {
                    name: "Milk".to_string(),
                    category: Category::Dairy,
                    price: Money::from_rupees(50),
                    stock: StockLevel::from_units(20),
                    harvest_date: None,
                },
            )
            .await
            .unwrap();

        Fixture {
            orders: OrderService::new(store.clone()),
            store,
            customer,
            farmer,
            other_farmer,
            product,
            other_product,
        }
    }

    #[tokio::test]
    async fn test_customer_sees_own_orders_only() {
        let f = fixture().await;
        f.place_order().await;

        let mine = f.orders.customer_orders(f.customer).await.unwrap();
        assert_eq!(mine.len(), 1);

        let stranger = UserId::new();
        ProfileService::new(f.store.clone())
            .register(stranger, Role::Customer)
            .await;
        assert!(f.orders.customer_orders(stranger).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_foreign_order_detail_not_found() {
        let f = fixture().await;
        let order_id = f.place_order().await;

        let stranger = UserId::new();
        ProfileService::new(f.store.clone())
            .register(stranger, Role::Customer)
            .await;

        let err = f
            .orders
            .customer_order_detail(stranger, order_id)
            .await
            .unwrap_err();
        assert_eq!(err, MarketError::NotFound);
    }

    #[tokio::test]
    async fn test_cancel_pending_order() {
        let f = fixture().await;
        let order_id = f.place_order().await;

        f.orders.cancel_order(f.customer, order_id).await.unwrap();
        assert_eq!(f.order_status(order_id).await, OrderStatus::Cancelled);
    }

    #[tokio::test]
    async fn test_cancel_shipped_order_is_noop() {
        let f = fixture().await;
        let order_id = f.place_order().await;
        let item = f.item_of(order_id, f.product).await;

        f.orders
            .update_item_status(f.farmer, item, ItemStatus::Shipped)
            .await
            .unwrap();
        assert_eq!(f.order_status(order_id).await, OrderStatus::Shipped);

        // No error, no change.
        f.orders.cancel_order(f.customer, order_id).await.unwrap();
        assert_eq!(f.order_status(order_id).await, OrderStatus::Shipped);
    }

    #[tokio::test]
    async fn test_item_transition_rolls_up() {
        let f = fixture().await;
        let order_id = f.place_order().await;
        let item = f.item_of(order_id, f.product).await;
        let other_item = f.item_of(order_id, f.other_product).await;

        f.orders
            .update_item_status(f.farmer, item, ItemStatus::Shipped)
            .await
            .unwrap();
        f.orders
            .update_item_status(f.farmer, item, ItemStatus::Delivered)
            .await
            .unwrap();
        // One line still pending keeps the order at Shipped.
        assert_eq!(f.order_status(order_id).await, OrderStatus::Shipped);

        f.orders
            .update_item_status(f.other_farmer, other_item, ItemStatus::Shipped)
            .await
            .unwrap();
        f.orders
            .update_item_status(f.other_farmer, other_item, ItemStatus::Delivered)
            .await
            .unwrap();
        assert_eq!(f.order_status(order_id).await, OrderStatus::Delivered);
    }

    #[tokio::test]
    async fn test_illegal_transition_silently_ignored() {
        let f = fixture().await;
        let order_id = f.place_order().await;
        let item = f.item_of(order_id, f.product).await;

        // Skipping straight to Delivered is discarded, but the
        // rollup still runs and lifts the order out of Pending.
        f.orders
            .update_item_status(f.farmer, item, ItemStatus::Delivered)
            .await
            .unwrap();

        f.store
            .with_read(|state| {
                let order = state.order(order_id).unwrap();
                assert_eq!(order.item(item).unwrap().status, ItemStatus::Pending);
                assert_eq!(order.status(), OrderStatus::Shipped);
            })
            .await;
    }

    #[tokio::test]
    async fn test_rollup_revives_cancelled_order() {
        let f = fixture().await;
        let order_id = f.place_order().await;
        let item = f.item_of(order_id, f.product).await;

        f.orders.cancel_order(f.customer, order_id).await.unwrap();
        assert_eq!(f.order_status(order_id).await, OrderStatus::Cancelled);

        f.orders
            .update_item_status(f.farmer, item, ItemStatus::Shipped)
            .await
            .unwrap();
        assert_eq!(f.order_status(order_id).await, OrderStatus::Shipped);
    }

    #[tokio::test]
    async fn test_farmer_cannot_touch_other_farmers_item() {
        let f = fixture().await;
        let order_id = f.place_order().await;
        let other_item = f.item_of(order_id, f.other_product).await;

        let err = f
            .orders
            .update_item_status(f.farmer, other_item, ItemStatus::Shipped)
            .await
            .unwrap_err();
        assert_eq!(err, MarketError::NotFound);
    }

    #[tokio::test]
    async fn test_farmer_order_detail_filters_items() {
        let f = fixture().await;
        let order_id = f.place_order().await;

        let detail = f
            .orders
            .farmer_order_detail(f.farmer, order_id)
            .await
            .unwrap();
        assert_eq!(detail.items.len(), 1);
        assert_eq!(detail.items[0].product_id, f.product);

        // A farmer with no items in the order sees nothing.
        let uninvolved = UserId::new();
        ProfileService::new(f.store.clone())
            .register(uninvolved, Role::Farmer)
            .await;
        let err = f
            .orders
            .farmer_order_detail(uninvolved, order_id)
            .await
            .unwrap_err();
        assert_eq!(err, MarketError::NotFound);
    }

    #[tokio::test]
    async fn test_farmer_dashboard_requires_verification() {
        let f = fixture().await;
        f.place_order().await;

        let err = f.orders.farmer_dashboard(f.farmer).await.unwrap_err();
        assert_eq!(err, MarketError::PendingVerification);

        f.store
            .with_write(|state| {
                state.profile_mut(f.farmer).unwrap().is_verified = true;
            })
            .await;

        let dashboard = f.orders.farmer_dashboard(f.farmer).await.unwrap();
        assert_eq!(dashboard.products.len(), 1);
        assert_eq!(dashboard.incoming.len(), 1);
        assert_eq!(dashboard.incoming[0].item.product_id, f.product);
    }

    #[tokio::test]
    async fn test_farmer_orders_lists_involved_orders() {
        let f = fixture().await;
        let order_id = f.place_order().await;

        let involved = f.orders.farmer_orders(f.farmer).await.unwrap();
        assert_eq!(involved.len(), 1);
        assert_eq!(involved[0].order_id, order_id);

        let uninvolved = UserId::new();
        ProfileService::new(f.store.clone())
            .register(uninvolved, Role::Farmer)
            .await;
        assert!(f.orders.farmer_orders(uninvolved).await.unwrap().is_empty());
    }
}
