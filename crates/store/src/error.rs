use common::UserId;
use domain::{CartItemId, OrderId, OrderItemId, ProductId};
use thiserror::Error;

/// Errors raised by datastore lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("profile not found for user {0}")]
    ProfileNotFound(UserId),

    #[error("product not found: {0}")]
    ProductNotFound(ProductId),

    #[error("order not found: {0}")]
    OrderNotFound(OrderId),

    #[error("order item not found: {0}")]
    OrderItemNotFound(OrderItemId),

    #[error("cart item not found: {0}")]
    CartItemNotFound(CartItemId),
}

/// Result type for datastore operations.
pub type Result<T> = std::result::Result<T, StoreError>;
