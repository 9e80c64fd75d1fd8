//! Shared types for the farm marketplace.

pub mod types;

pub use types::UserId;
