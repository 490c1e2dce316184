//! Order aggregate and related types.

mod aggregate;
mod state;

pub use aggregate::{Order, OrderItem};
pub use state::OrderStatus;

use thiserror::Error;

use crate::ids::ProductId;
use crate::money::MoneyError;

/// Errors that can occur during order operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OrderError {
    /// Item quantity must be positive.
    #[error("Invalid quantity: {quantity} (must be greater than 0)")]
    InvalidQuantity { quantity: u32 },

    /// Product does not have enough stock for the requested quantity.
    #[error("Insufficient stock for {product_id}: requested {requested}, available {available}")]
    InsufficientStock {
        product_id: ProductId,
        requested: u32,
        available: u32,
    },

    /// The requested transition is not legal from the current status.
    #[error("Illegal transition: cannot {action} a {status} order")]
    IllegalTransition {
        status: OrderStatus,
        action: &'static str,
    },

    /// Monetary arithmetic failed while recomputing the total.
    #[error(transparent)]
    Money(#[from] MoneyError),
}
