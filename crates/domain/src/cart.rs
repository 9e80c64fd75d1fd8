//! Per-customer cart, the staging area before an order exists.

use common::UserId;
use serde::{Deserialize, Serialize};

use crate::ids::{CartItemId, ProductId};

/// Direction of a single-step quantity adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Adjustment {
    Increase,
    Decrease,
}

/// One product-and-quantity entry in a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: CartItemId,
    pub product_id: ProductId,
    pub quantity: u32,
}

/// A customer's cart. Owned by exactly one customer; each product
/// appears at most once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cart {
    customer: UserId,
    items: Vec<CartItem>,
}

impl Cart {
    /// Creates an empty cart for a customer.
    pub fn new(customer: UserId) -> Self {
        Self {
            customer,
            items: Vec::new(),
        }
    }

    /// Returns the owning customer.
    pub fn customer(&self) -> UserId {
        self.customer
    }

    /// Returns the items in insertion order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Returns true if the cart has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns an item by ID.
    pub fn item(&self, id: CartItemId) -> Option<&CartItem> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Adds a quantity of a product to the cart.
    ///
    /// If the product is already present, the existing line's quantity
    /// is incremented rather than a duplicate line created.
    pub fn add(&mut self, product_id: ProductId, quantity: u32) -> CartItemId {
        if let Some(existing) = self.items.iter_mut().find(|i| i.product_id == product_id) {
            existing.quantity += quantity;
            existing.id
        } else {
            let item = CartItem {
                id: CartItemId::new(),
                product_id,
                quantity,
            };
            let id = item.id;
            self.items.push(item);
            id
        }
    }

    /// Adjusts an item's quantity by one step.
    ///
    /// An increase always succeeds. A decrease that would drop the
    /// quantity to zero removes the item entirely instead of leaving
    /// it at zero. Returns false if the item is not in this cart.
    pub fn adjust(&mut self, id: CartItemId, direction: Adjustment) -> bool {
        let Some(pos) = self.items.iter().position(|i| i.id == id) else {
            return false;
        };

        match direction {
            Adjustment::Increase => self.items[pos].quantity += 1,
            Adjustment::Decrease if self.items[pos].quantity > 1 => {
                self.items[pos].quantity -= 1;
            }
            Adjustment::Decrease => {
                self.items.remove(pos);
            }
        }
        true
    }

    /// Removes an item unconditionally. Returns false if absent.
    pub fn remove(&mut self, id: CartItemId) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i.id != id);
        self.items.len() != before
    }

    /// Removes every item. Called when an order has been created
    /// from this cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cart() -> Cart {
        Cart::new(UserId::new())
    }

    #[test]
    fn test_add_merges_same_product() {
        let mut cart = cart();
        let product = ProductId::new();

        let first = cart.add(product, 2);
        let second = cart.add(product, 3);

        assert_eq!(first, second);
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].quantity, 5);
    }

    #[test]
    fn test_add_distinct_products() {
        let mut cart = cart();
        cart.add(ProductId::new(), 1);
        cart.add(ProductId::new(), 1);
        assert_eq!(cart.items().len(), 2);
    }

    #[test]
    fn test_increase() {
        let mut cart = cart();
        let id = cart.add(ProductId::new(), 1);

        assert!(cart.adjust(id, Adjustment::Increase));
        assert_eq!(cart.item(id).unwrap().quantity, 2);
    }

    #[test]
    fn test_decrease_above_one() {
        let mut cart = cart();
        let id = cart.add(ProductId::new(), 3);

        assert!(cart.adjust(id, Adjustment::Decrease));
        assert_eq!(cart.item(id).unwrap().quantity, 2);
    }

    #[test]
    fn test_decrease_at_one_removes_item() {
        let mut cart = cart();
        let id = cart.add(ProductId::new(), 1);

        assert!(cart.adjust(id, Adjustment::Decrease));
        assert!(cart.item(id).is_none());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_adjust_unknown_item() {
        let mut cart = cart();
        assert!(!cart.adjust(CartItemId::new(), Adjustment::Increase));
    }

    #[test]
    fn test_remove() {
        let mut cart = cart();
        let id = cart.add(ProductId::new(), 2);

        assert!(cart.remove(id));
        assert!(!cart.remove(id));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut cart = cart();
        cart.add(ProductId::new(), 1);
        cart.add(ProductId::new(), 2);

        cart.clear();
        assert!(cart.is_empty());
    }
}
