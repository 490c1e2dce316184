//! Product catalog entity.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ids::ProductId;
use crate::money::Money;
use crate::version::Version;

/// Errors that can occur adjusting product stock.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProductError {
    /// Adjustment would drive stock below zero.
    #[error("Cannot have negative stock: {stock} on hand, delta {delta}")]
    NegativeStock { stock: u32, delta: i64 },

    /// Adjustment would overflow the stock counter.
    #[error("Stock overflow: {stock} on hand, delta {delta}")]
    StockOverflow { stock: u32, delta: i64 },
}

/// A catalog item with a mutable stock counter.
///
/// Identity is the product ID. Stock is unsigned, so a negative level is
/// unrepresentable; adjustments are checked before any mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    name: String,
    description: String,
    price: Money,
    stock: u32,
    #[serde(default)]
    version: Version,
}

impl Product {
    /// Creates a new product with the given initial stock.
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        description: impl Into<String>,
        price: Money,
        stock: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            price,
            stock,
            version: Version::initial(),
        }
    }

    /// Returns the product ID.
    pub fn id(&self) -> &ProductId {
        &self.id
    }

    /// Returns the product name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the product description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the current unit price.
    pub fn price(&self) -> Money {
        self.price
    }

    /// Returns the units on hand.
    pub fn stock(&self) -> u32 {
        self.stock
    }

    /// Returns the version used for optimistic concurrency.
    pub fn version(&self) -> Version {
        self.version
    }

    /// Sets the version. Called by the storage layer after a successful update.
    pub fn set_version(&mut self, version: Version) {
        self.version = version;
    }

    /// Adjusts stock by `delta`: positive to restock, negative to allocate.
    ///
    /// The new level is validated before anything changes; on failure the
    /// stock is left exactly as it was.
    pub fn update_stock(&mut self, delta: i64) -> Result<(), ProductError> {
        let new_stock = i64::from(self.stock) + delta;
        if new_stock < 0 {
            return Err(ProductError::NegativeStock {
                stock: self.stock,
                delta,
            });
        }
        let new_stock = u32::try_from(new_stock).map_err(|_| ProductError::StockOverflow {
            stock: self.stock,
            delta,
        })?;
        self.stock = new_stock;
        Ok(())
    }
}

impl PartialEq for Product {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Product {}

#[cfg(test)]
mod tests {
    use super::*;

    fn widget(stock: u32) -> Product {
        Product::new(
            "SKU-001",
            "Widget",
            "A standard widget",
            Money::of(1000).unwrap(),
            stock,
        )
    }

    #[test]
    fn new_product_starts_at_initial_version() {
        let product = widget(10);
        assert_eq!(product.stock(), 10);
        assert_eq!(product.version(), Version::initial());
    }

    #[test]
    fn update_stock_allocates_and_restocks() {
        let mut product = widget(10);
        product.update_stock(-4).unwrap();
        assert_eq!(product.stock(), 6);
        product.update_stock(7).unwrap();
        assert_eq!(product.stock(), 13);
    }

    #[test]
    fn update_stock_rejects_overdraw_without_mutation() {
        let mut product = widget(5);
        let result = product.update_stock(-6);
        assert_eq!(
            result,
            Err(ProductError::NegativeStock { stock: 5, delta: -6 })
        );
        assert_eq!(product.stock(), 5);
    }

    #[test]
    fn update_stock_allows_draining_to_zero() {
        let mut product = widget(5);
        product.update_stock(-5).unwrap();
        assert_eq!(product.stock(), 0);
    }

    #[test]
    fn update_stock_rejects_counter_overflow() {
        let mut product = widget(u32::MAX);
        let result = product.update_stock(1);
        assert!(matches!(result, Err(ProductError::StockOverflow { .. })));
        assert_eq!(product.stock(), u32::MAX);
    }

    #[test]
    fn identity_is_by_id() {
        let a = widget(1);
        let mut b = widget(99);
        b.update_stock(-9).unwrap();
        assert_eq!(a, b);
    }
}
