//! Application layer for the order lifecycle system.
//!
//! Two workflow surfaces:
//! - [`OrderService`] for simple creation and the status transitions
//!   (confirm, ship, deliver, cancel)
//! - [`CheckoutPipeline`] for the full checkout: creation, discount,
//!   shipping quote, persistence, delivery scheduling, and confirmation,
//!   with per-step records and compensation on partial failure
//!
//! External collaborators are reached through ports: storage in the `store`
//! crate, notification and fulfillment in [`services`].

pub mod error;
pub mod orders;
pub mod pipeline;
pub mod services;

pub use error::{CheckoutError, Result};
pub use orders::{OrderLine, OrderService};
pub use pipeline::{CheckoutPipeline, CheckoutReceipt, StepRecord};
pub use services::{
    FulfillmentService, InMemoryFulfillmentService, InMemoryNotificationService,
    NotificationService, SentConfirmation,
};
