//! Stock level value object.

use serde::{Deserialize, Serialize};

/// Stock quantity with two fractional digits, stored as hundredths.
///
/// Weight-based products are stocked in fractional kilograms
/// (e.g., 12.50 kg), so stock cannot be a plain integer count.
/// Like [`crate::Money`], the fixed-point representation avoids
/// floating point entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StockLevel {
    /// Quantity in hundredths (e.g., 1250 = 12.50)
    hundredths: i64,
}

impl StockLevel {
    /// Creates a stock level from a whole number of units.
    pub fn from_units(units: u32) -> Self {
        Self {
            hundredths: units as i64 * 100,
        }
    }

    /// Creates a stock level from hundredths of a unit.
    pub fn from_hundredths(hundredths: i64) -> Self {
        Self { hundredths }
    }

    /// Returns zero stock.
    pub fn zero() -> Self {
        Self { hundredths: 0 }
    }

    /// Returns the quantity in hundredths.
    pub fn hundredths(&self) -> i64 {
        self.hundredths
    }

    /// Returns true if the stock covers an ordered quantity of whole units.
    pub fn covers(&self, quantity: u32) -> bool {
        self.hundredths >= quantity as i64 * 100
    }

    /// Subtracts a whole-unit quantity, returning `None` if the result
    /// would be negative. Committed stock must never go below zero.
    pub fn checked_sub_units(&self, quantity: u32) -> Option<StockLevel> {
        let remaining = self.hundredths - quantity as i64 * 100;
        if remaining < 0 {
            None
        } else {
            Some(StockLevel {
                hundredths: remaining,
            })
        }
    }

    /// Returns true if no stock remains.
    pub fn is_empty(&self) -> bool {
        self.hundredths <= 0
    }
}

impl Default for StockLevel {
    fn default() -> Self {
        Self::zero()
    }
}

impl std::fmt::Display for StockLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{:02}", self.hundredths / 100, self.hundredths.abs() % 100)
    }
}
