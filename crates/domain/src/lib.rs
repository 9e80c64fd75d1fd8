//! Domain layer for the farm marketplace.
//!
//! This crate provides the core domain model:
//! - Value objects for money, stock levels, and typed identifiers
//! - Product with category-derived unit of measure
//! - Profile with role, block, and verification flags
//! - Cart with merge-on-re-add semantics
//! - Order and line items with their status state machines and rollup

pub mod address;
pub mod cart;
pub mod ids;
pub mod money;
pub mod order;
pub mod payment;
pub mod product;
pub mod profile;
pub mod status;
pub mod stock;

pub use address::{AddressError, MIN_ADDRESS_LEN, validate_address};
pub use cart::{Adjustment, Cart, CartItem};
pub use ids::{CartItemId, OrderId, OrderItemId, ProductId};
pub use money::Money;
pub use order::{Order, OrderItem};
pub use payment::PaymentMethod;
pub use product::{Category, Product, Unit};
pub use profile::{Profile, Role, validate_phone};
pub use status::{ItemStatus, OrderStatus};
pub use stock::StockLevel;
