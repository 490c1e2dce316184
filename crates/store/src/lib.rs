//! Storage ports for the order lifecycle system.
//!
//! The core depends on two ports: a [`ProductCatalog`] for catalog lookups
//! and stock persistence, and an [`OrderStore`] for the order aggregate.
//! Updates are guarded by an optimistic version check so two workflows racing
//! on the same aggregate surface as an explicit conflict instead of a silent
//! lost update.
//!
//! The in-memory implementations back the test suites and the checkout
//! pipeline integration tests.

pub mod catalog;
pub mod error;
pub mod orders;

pub use catalog::{InMemoryProductCatalog, ProductCatalog};
pub use error::{Result, StoreError};
pub use orders::{InMemoryOrderStore, OrderStore};
