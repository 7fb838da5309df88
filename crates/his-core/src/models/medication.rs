//! Medication inventory models.

use serde::{Deserialize, Serialize};

/// A single medication in the pharmacy inventory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Medication {
    /// Inventory ID (e.g. "M001"), primary key
    pub id: String,
    /// Medication name
    pub name: String,
    /// Packaging description (e.g. "0.25g*24粒")
    pub spec: String,
    /// Units currently in stock, never negative
    pub stock: i64,
    /// Stock unit (e.g. "盒")
    pub unit: String,
    /// Unit price
    pub price: f64,
    /// Category (free text, e.g. "抗生素")
    pub category: String,
}

impl Medication {
    /// Apply a stock adjustment, clamping at zero.
    ///
    /// A delta that would drive stock negative silently floors the result
    /// at zero rather than failing.
    pub fn adjust_stock(&mut self, delta: i64) {
        self.stock = (self.stock + delta).max(0);
    }

    /// Check whether the requested quantity can be dispensed.
    pub fn has_stock_for(&self, quantity: i64) -> bool {
        self.stock >= quantity
    }
}
