//! Checkout error types.

use domain::{CustomerError, InventoryError, OrderError, OrderId, ProductId};
use store::StoreError;
use thiserror::Error;

/// Errors that can occur in the application workflows.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// A requested product is not in the catalog.
    #[error("Product {0} not found")]
    ProductNotFound(ProductId),

    /// The requested order does not exist.
    #[error("Order {0} not found")]
    OrderNotFound(OrderId),

    /// An order operation failed.
    #[error(transparent)]
    Order(#[from] OrderError),

    /// A customer operation failed.
    #[error(transparent)]
    Customer(#[from] CustomerError),

    /// A stock movement could not be applied.
    #[error(transparent)]
    Inventory(#[from] InventoryError),

    /// A storage port failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The notification service failed.
    #[error("Notification service error: {0}")]
    Notification(String),

    /// The fulfillment service failed.
    #[error("Fulfillment service error: {0}")]
    Fulfillment(String),

    /// A compensating action failed after a checkout step did.
    #[error("Compensation for step '{step}' failed: {reason}")]
    CompensationFailed { step: &'static str, reason: String },
}

/// Convenience type alias for checkout results.
pub type Result<T> = std::result::Result<T, CheckoutError>;
