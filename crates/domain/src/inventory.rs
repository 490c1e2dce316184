//! Stock movements and their application to the product catalog.
//!
//! Order operations never reach across the aggregate boundary to mutate a
//! `Product`. They return [`StockMovement`] events instead, and a
//! coordinating layer applies those movements to the products it loaded.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ids::ProductId;
use crate::product::{Product, ProductError};

/// Errors that can occur applying stock movements.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InventoryError {
    /// A movement references a product that is not in the working set.
    #[error("Unknown product in stock movement: {product_id}")]
    UnknownProduct { product_id: ProductId },

    /// The resulting stock level would be invalid.
    #[error(transparent)]
    Product(#[from] ProductError),
}

/// A stock side effect produced by an order operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum StockMovement {
    /// Stock was reserved for an order item.
    Reserved { product_id: ProductId, quantity: u32 },

    /// Reserved stock was released back to the catalog.
    Released { product_id: ProductId, quantity: u32 },
}

impl StockMovement {
    /// Returns the product the movement applies to.
    pub fn product_id(&self) -> &ProductId {
        match self {
            StockMovement::Reserved { product_id, .. }
            | StockMovement::Released { product_id, .. } => product_id,
        }
    }

    /// Returns the quantity moved.
    pub fn quantity(&self) -> u32 {
        match self {
            StockMovement::Reserved { quantity, .. }
            | StockMovement::Released { quantity, .. } => *quantity,
        }
    }

    /// Returns the signed stock delta: negative for a reservation,
    /// positive for a release.
    pub fn delta(&self) -> i64 {
        match self {
            StockMovement::Reserved { quantity, .. } => -i64::from(*quantity),
            StockMovement::Released { quantity, .. } => i64::from(*quantity),
        }
    }

    /// Returns the event type name.
    pub fn event_type(&self) -> &'static str {
        match self {
            StockMovement::Reserved { .. } => "StockReserved",
            StockMovement::Released { .. } => "StockReleased",
        }
    }
}

/// Applies a batch of movements to a product set, all or nothing.
///
/// Phase one validates every movement against the working set, including
/// movements that stack on the same product; phase two mutates. A failed
/// validation leaves every product untouched.
pub fn apply_movements(
    products: &mut HashMap<ProductId, Product>,
    movements: &[StockMovement],
) -> Result<(), InventoryError> {
    let mut projected: HashMap<ProductId, i64> = HashMap::new();
    for movement in movements {
        let product_id = movement.product_id();
        let product = products
            .get(product_id)
            .ok_or_else(|| InventoryError::UnknownProduct {
                product_id: product_id.clone(),
            })?;
        let level = projected
            .entry(product_id.clone())
            .or_insert_with(|| i64::from(product.stock()));
        let next = *level + movement.delta();
        if next < 0 {
            return Err(ProductError::NegativeStock {
                stock: product.stock(),
                delta: movement.delta(),
            }
            .into());
        }
        if next > i64::from(u32::MAX) {
            return Err(ProductError::StockOverflow {
                stock: product.stock(),
                delta: movement.delta(),
            }
            .into());
        }
        *level = next;
    }

    for movement in movements {
        if let Some(product) = products.get_mut(movement.product_id()) {
            product.update_stock(movement.delta())?;
        }
    }
    Ok(())
}
