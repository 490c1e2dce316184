//! External service ports consumed by the checkout pipeline.

pub mod fulfillment;
pub mod notification;

pub use fulfillment::{FulfillmentService, InMemoryFulfillmentService};
pub use notification::{InMemoryNotificationService, NotificationService, SentConfirmation};
