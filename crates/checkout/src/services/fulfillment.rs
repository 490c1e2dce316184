//! Fulfillment port and in-memory implementation.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use domain::{Money, Order, OrderId};

use crate::error::CheckoutError;

/// Port for shipping cost quotes and delivery scheduling.
#[async_trait]
pub trait FulfillmentService: Send + Sync {
    /// Quotes the shipping cost for an order.
    async fn calculate_shipping_cost(&self, order: &Order) -> Result<Money, CheckoutError>;

    /// Schedules delivery for an order.
    async fn schedule_delivery(&self, order: &Order) -> Result<(), CheckoutError>;
}

#[derive(Debug, Default)]
struct InMemoryFulfillmentState {
    scheduled: HashMap<OrderId, String>,
    next_id: u32,
    fail_on_quote: bool,
    fail_on_schedule: bool,
}

/// In-memory fulfillment service for testing.
///
/// Quotes a flat per-line rate and hands out sequential delivery slots.
#[derive(Debug, Clone, Default)]
pub struct InMemoryFulfillmentService {
    state: Arc<RwLock<InMemoryFulfillmentState>>,
}

/// Flat shipping rate per order line, in minor units.
const RATE_PER_LINE_MINOR: i64 = 750;

impl InMemoryFulfillmentService {
    /// Creates a new in-memory fulfillment service.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the service to fail on the next quote call.
    pub fn set_fail_on_quote(&self, fail: bool) {
        self.state.write().unwrap().fail_on_quote = fail;
    }

    /// Configures the service to fail on the next schedule call.
    pub fn set_fail_on_schedule(&self, fail: bool) {
        self.state.write().unwrap().fail_on_schedule = fail;
    }

    /// Returns the number of scheduled deliveries.
    pub fn scheduled_count(&self) -> usize {
        self.state.read().unwrap().scheduled.len()
    }

    /// Returns true if a delivery is scheduled for the order.
    pub fn has_scheduled(&self, order_id: OrderId) -> bool {
        self.state.read().unwrap().scheduled.contains_key(&order_id)
    }
}

#[async_trait]
impl FulfillmentService for InMemoryFulfillmentService {
    async fn calculate_shipping_cost(&self, order: &Order) -> Result<Money, CheckoutError> {
        let state = self.state.read().unwrap();
        if state.fail_on_quote {
            return Err(CheckoutError::Fulfillment(
                "Carrier quote unavailable".to_string(),
            ));
        }

        let lines = i64::try_from(order.item_count()).unwrap_or(i64::MAX);
        Money::from_minor(
            RATE_PER_LINE_MINOR * lines,
            order.total_amount().currency(),
        )
        .map_err(|e| CheckoutError::Fulfillment(e.to_string()))
    }

    async fn schedule_delivery(&self, order: &Order) -> Result<(), CheckoutError> {
        let mut state = self.state.write().unwrap();
        if state.fail_on_schedule {
            return Err(CheckoutError::Fulfillment(
                "No delivery slots available".to_string(),
            ));
        }

        state.next_id += 1;
        let slot = format!("SLOT-{:04}", state.next_id);
        state.scheduled.insert(order.id(), slot);
        Ok(())
    }
}
