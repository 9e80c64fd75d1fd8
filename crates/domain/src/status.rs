//! Order and line-item status state machines.

use serde::{Deserialize, Serialize};

/// Aggregate status of an order.
///
/// Pending and Cancelled are set directly (creation and cancellation);
/// Shipped and Delivered are normally derived from line-item statuses
/// by the rollup, though an admin may force any of the three
/// non-Pending values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OrderStatus {
    #[default]
    Pending,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Returns true if a customer may still cancel the order.
    pub fn can_cancel(&self) -> bool {
        matches!(self, OrderStatus::Pending)
    }

    /// Returns the status name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Fulfillment status of a single line item.
///
/// State transitions:
/// ```text
/// Pending ──► Shipped ──► Delivered
/// ```
/// Cancellation exists only at the order level; a line item is never
/// individually cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ItemStatus {
    #[default]
    Pending,
    Shipped,
    Delivered,
}

impl ItemStatus {
    /// Returns the only legal next status, or `None` from the
    /// terminal state.
    pub fn next(&self) -> Option<ItemStatus> {
        match self {
            ItemStatus::Pending => Some(ItemStatus::Shipped),
            ItemStatus::Shipped => Some(ItemStatus::Delivered),
            ItemStatus::Delivered => None,
        }
    }

    /// Returns true if `requested` is the legal next status.
    pub fn can_become(&self, requested: ItemStatus) -> bool {
        self.next() == Some(requested)
    }

    /// Returns true if the item still needs fulfillment work. Open
    /// items hold the parent order's rollup at Shipped.
    pub fn is_open(&self) -> bool {
        matches!(self, ItemStatus::Pending | ItemStatus::Shipped)
    }

    /// Returns the status name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::Pending => "Pending",
            ItemStatus::Shipped => "Shipped",
            ItemStatus::Delivered => "Delivered",
        }
    }
}

impl std::fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_statuses_are_pending() {
        assert_eq!(OrderStatus::default(), OrderStatus::Pending);
        assert_eq!(ItemStatus::default(), ItemStatus::Pending);
    }

    #[test]
    fn test_only_pending_orders_can_cancel() {
        assert!(OrderStatus::Pending.can_cancel());
        assert!(!OrderStatus::Shipped.can_cancel());
        assert!(!OrderStatus::Delivered.can_cancel());
        assert!(!OrderStatus::Cancelled.can_cancel());
    }

    #[test]
    fn test_item_transition_chain() {
        assert_eq!(ItemStatus::Pending.next(), Some(ItemStatus::Shipped));
        assert_eq!(ItemStatus::Shipped.next(), Some(ItemStatus::Delivered));
        assert_eq!(ItemStatus::Delivered.next(), None);
    }

    #[test]
    fn test_can_become_rejects_skips_and_reversals() {
        assert!(ItemStatus::Pending.can_become(ItemStatus::Shipped));
        assert!(ItemStatus::Shipped.can_become(ItemStatus::Delivered));

        // Skipping Shipped is not allowed.
        assert!(!ItemStatus::Pending.can_become(ItemStatus::Delivered));
        // Going backwards is not allowed.
        assert!(!ItemStatus::Delivered.can_become(ItemStatus::Shipped));
        assert!(!ItemStatus::Shipped.can_become(ItemStatus::Pending));
        // Self-transitions are not allowed.
        assert!(!ItemStatus::Pending.can_become(ItemStatus::Pending));
    }

    #[test]
    fn test_is_open() {
        assert!(ItemStatus::Pending.is_open());
        assert!(ItemStatus::Shipped.is_open());
        assert!(!ItemStatus::Delivered.is_open());
    }

    #[test]
    fn test_display() {
        assert_eq!(OrderStatus::Cancelled.to_string(), "Cancelled");
        assert_eq!(ItemStatus::Shipped.to_string(), "Shipped");
    }
}
