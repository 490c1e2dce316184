//! Notification port and in-memory implementation.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use domain::{Customer, CustomerId, Money, Order, OrderId};

use crate::error::CheckoutError;

/// Port for customer-facing notifications.
#[async_trait]
pub trait NotificationService: Send + Sync {
    /// Sends the order confirmation, including the granted discount.
    async fn send_order_confirmation(
        &self,
        order: &Order,
        customer: &Customer,
        discount: Money,
    ) -> Result<(), CheckoutError>;
}

/// A confirmation recorded by the in-memory service.
#[derive(Debug, Clone)]
pub struct SentConfirmation {
    /// The confirmed order.
    pub order_id: OrderId,
    /// The addressed customer.
    pub customer_id: CustomerId,
    /// The discount communicated to the customer.
    pub discount: Money,
}

#[derive(Debug, Default)]
struct InMemoryNotificationState {
    sent: Vec<SentConfirmation>,
    fail_on_send: bool,
}

/// In-memory notification service for testing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryNotificationService {
    state: Arc<RwLock<InMemoryNotificationState>>,
}

impl InMemoryNotificationService {
    /// Creates a new in-memory notification service.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the service to fail on the next send call.
    pub fn set_fail_on_send(&self, fail: bool) {
        self.state.write().unwrap().fail_on_send = fail;
    }

    /// Returns the number of confirmations sent.
    pub fn sent_count(&self) -> usize {
        self.state.read().unwrap().sent.len()
    }

    /// Returns the most recently sent confirmation, if any.
    pub fn last_confirmation(&self) -> Option<SentConfirmation> {
        self.state.read().unwrap().sent.last().cloned()
    }
}

#[async_trait]
impl NotificationService for InMemoryNotificationService {
    async fn send_order_confirmation(
        &self,
        order: &Order,
        customer: &Customer,
        discount: Money,
    ) -> Result<(), CheckoutError> {
        let mut state = self.state.write().unwrap();

        if state.fail_on_send {
            return Err(CheckoutError::Notification("SMTP unavailable".to_string()));
        }

        state.sent.push(SentConfirmation {
            order_id: order.id(),
            customer_id: customer.id(),
            discount,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::{Customer, CustomerId};

    fn order_and_customer() -> (Order, Customer) {
        let customer = Customer::new(
            CustomerId::new(),
            "Ada Lovelace",
            "ada@example.com",
            "12 Analytical Way",
        )
        .unwrap();
        (Order::create(customer.clone()), customer)
    }

    #[tokio::test]
    async fn records_sent_confirmations() {
        let service = InMemoryNotificationService::new();
        let (order, customer) = order_and_customer();
        let discount = Money::of(500).unwrap();

        service
            .send_order_confirmation(&order, &customer, discount)
            .await
            .unwrap();

        assert_eq!(service.sent_count(), 1);
        let sent = service.last_confirmation().unwrap();
        assert_eq!(sent.order_id, order.id());
        assert_eq!(sent.customer_id, customer.id());
        assert_eq!(sent.discount, discount);
    }

    #[tokio::test]
    async fn fail_on_send() {
        let service = InMemoryNotificationService::new();
        service.set_fail_on_send(true);
        let (order, customer) = order_and_customer();

        let result = service
            .send_order_confirmation(&order, &customer, Money::of(0).unwrap())
            .await;

        assert!(matches!(result, Err(CheckoutError::Notification(_))));
        assert_eq!(service.sent_count(), 0);
    }
}
