//! Service-level error taxonomy.

use domain::{AddressError, Role, StockLevel};
use market_store::StoreError;
use thiserror::Error;

/// Errors surfaced to the presentation boundary.
///
/// Every variant is recoverable at the call site and carries enough
/// detail for a corrective message. Authorization failures across
/// actors collapse into [`MarketError::NotFound`] so callers cannot
/// probe for the existence of other users' data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarketError {
    /// A farmer tried to buy their own product.
    #[error("you cannot purchase your own product")]
    SelfPurchase,

    /// Cart quantities must be at least 1.
    #[error("quantity must be at least 1 (got {quantity})")]
    InvalidQuantity { quantity: u32 },

    /// Checkout requires a non-empty cart.
    #[error("your cart is empty")]
    EmptyCart,

    /// The shipping address failed a format rule.
    #[error(transparent)]
    Address(#[from] AddressError),

    /// No payment method was selected.
    #[error("please select a payment method")]
    PaymentMethodRequired,

    /// Online payment is offered but not yet available; the cart is
    /// left intact so the customer can retry with cash on delivery.
    #[error("online payment is not yet available, please choose cash on delivery")]
    UnsupportedPayment,

    /// A cart line asked for more than the product has in stock.
    #[error("insufficient stock for {product}, available: {available}")]
    InsufficientStock {
        product: String,
        available: StockLevel,
    },

    /// The entity does not exist, or belongs to someone else.
    #[error("not found")]
    NotFound,

    /// The caller's role does not permit this operation.
    #[error("this operation requires the {required} role")]
    ForbiddenRole { required: Role },

    /// The caller's account has been blocked by an admin.
    #[error("your account has been restricted, please contact support")]
    AccountBlocked,

    /// A farmer account awaiting admin verification.
    #[error("your farmer account is pending verification")]
    PendingVerification,

    /// A contact phone number that is not exactly ten digits.
    #[error("phone number must contain exactly 10 digits")]
    InvalidPhone,
}

impl From<StoreError> for MarketError {
    fn from(_: StoreError) -> Self {
        MarketError::NotFound
    }
}

/// Result type for marketplace operations.
pub type Result<T> = std::result::Result<T, MarketError>;
