//! Product and its category-derived unit of measure.

use chrono::{DateTime, NaiveDate, Utc};
use common::UserId;
use serde::{Deserialize, Serialize};

use crate::ids::ProductId;
use crate::money::Money;
use crate::stock::StockLevel;

/// Product categories offered on the marketplace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Vegetables,
    Fruits,
    Grains,
    Dairy,
}

impl Category {
    /// Returns the category name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Vegetables => "Vegetables",
            Category::Fruits => "Fruits",
            Category::Grains => "Grains",
            Category::Dairy => "Dairy",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Unit of measure a product is sold in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    /// Sold by weight in kilograms.
    Kg,
    /// Sold per piece.
    Each,
}

impl Unit {
    /// Derives the unit of measure from a product category.
    ///
    /// Weight-based categories are sold per kilogram; everything else
    /// is sold per piece. This derivation is authoritative: it is
    /// recomputed on every save and overrides any caller-supplied unit.
    pub fn for_category(category: Category) -> Unit {
        match category {
            Category::Vegetables | Category::Fruits | Category::Grains => Unit::Kg,
            Category::Dairy => Unit::Each,
        }
    }

    /// Returns the unit label as shown to users.
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Kg => "kg",
            Unit::Each => "unit",
        }
    }
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A product listed by a farmer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    /// The farmer who owns this listing.
    pub farmer: UserId,
    pub name: String,
    pub category: Category,
    pub price: Money,
    pub stock: StockLevel,
    unit: Unit,
    pub harvest_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Creates a new product. The unit of measure is derived from the
    /// category, never taken from the caller.
    pub fn new(
        farmer: UserId,
        name: impl Into<String>,
        category: Category,
        price: Money,
        stock: StockLevel,
        harvest_date: Option<NaiveDate>,
    ) -> Self {
        Self {
            id: ProductId::new(),
            farmer,
            name: name.into(),
            category,
            price,
            stock,
            unit: Unit::for_category(category),
            harvest_date,
            created_at: Utc::now(),
        }
    }

    /// Returns the derived unit of measure.
    pub fn unit(&self) -> Unit {
        self.unit
    }

    /// Changes the category and rederives the unit.
    pub fn set_category(&mut self, category: Category) {
        self.category = category;
        self.unit = Unit::for_category(category);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(category: Category) -> Product {
        Product::new(
            UserId::new(),
            "Test Produce",
            category,
            Money::from_rupees(40),
            StockLevel::from_units(10),
            None,
        )
    }

    #[test]
    fn test_unit_derived_from_category() {
        assert_eq!(Unit::for_category(Category::Vegetables), Unit::Kg);
        assert_eq!(Unit::for_category(Category::Fruits), Unit::Kg);
        assert_eq!(Unit::for_category(Category::Grains), Unit::Kg);
        assert_eq!(Unit::for_category(Category::Dairy), Unit::Each);
    }

    #[test]
    fn test_new_product_gets_derived_unit() {
        assert_eq!(product(Category::Grains).unit(), Unit::Kg);
        assert_eq!(product(Category::Dairy).unit(), Unit::Each);
    }

    #[test]
    fn test_set_category_rederives_unit() {
        let mut p = product(Category::Dairy);
        assert_eq!(p.unit(), Unit::Each);

        p.set_category(Category::Fruits);
        assert_eq!(p.unit(), Unit::Kg);
    }

    #[test]
    fn test_unit_labels() {
        assert_eq!(Unit::Kg.to_string(), "kg");
        assert_eq!(Unit::Each.to_string(), "unit");
    }
}
