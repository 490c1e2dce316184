//! Core domain for the order lifecycle system.
//!
//! This crate contains the business rules and nothing else:
//! - Money value object with currency-safe arithmetic
//! - Customer and Product catalog entities
//! - Order aggregate with its status state machine and derived total
//! - Stock movements emitted by order operations and applied to products
//! - Discount policy over an order snapshot
//!
//! Storage, notification and fulfillment live behind ports in sibling crates;
//! nothing here performs I/O.

pub mod customer;
pub mod discount;
pub mod ids;
pub mod inventory;
pub mod money;
pub mod order;
pub mod product;
pub mod version;

pub use customer::{Customer, CustomerError};
pub use discount::DiscountPolicy;
pub use ids::{CustomerId, OrderId, ProductId};
pub use inventory::{InventoryError, StockMovement};
pub use money::{Currency, Money, MoneyError};
pub use order::{Order, OrderError, OrderItem, OrderStatus};
pub use product::{Product, ProductError};
pub use version::Version;
