//! Full checkout orchestration.
//!
//! The pipeline runs creation, discount computation, shipping quotation,
//! persistence, delivery scheduling, and confirmation notification as an
//! explicit sequence. Each completed step is recorded, and a failure after
//! the persistence step triggers reverse-order compensation (restock, delete
//! the persisted order) instead of leaving half-committed state behind.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use domain::{Customer, DiscountPolicy, Money, Order, Product, ProductId};
use store::{OrderStore, ProductCatalog};

use crate::error::{CheckoutError, Result};
use crate::orders::{OrderLine, OrderService};
use crate::services::{FulfillmentService, NotificationService};

/// Step names recorded on the checkout receipt.
pub const STEP_BUILD_ORDER: &str = "BuildOrder";
pub const STEP_COMPUTE_DISCOUNT: &str = "ComputeDiscount";
pub const STEP_QUOTE_SHIPPING: &str = "QuoteShipping";
pub const STEP_PERSIST_ORDER: &str = "PersistOrder";
pub const STEP_SCHEDULE_DELIVERY: &str = "ScheduleDelivery";
pub const STEP_SEND_CONFIRMATION: &str = "SendConfirmation";

/// A completed pipeline step.
#[derive(Debug, Clone)]
pub struct StepRecord {
    /// The step name.
    pub step: &'static str,

    /// When the step completed.
    pub completed_at: DateTime<Utc>,
}

/// The outcome of a successful checkout.
#[derive(Debug, Clone)]
pub struct CheckoutReceipt {
    /// The persisted order.
    pub order: Order,

    /// The discount granted by the policy.
    pub discount: Money,

    /// The shipping cost charged; zero when free shipping applied.
    pub shipping_cost: Money,

    /// Whether the order qualified for free shipping.
    pub free_shipping: bool,

    /// The steps completed, in execution order.
    pub steps: Vec<StepRecord>,
}

/// Orchestrates the full checkout workflow over the storage and external
/// service ports.
pub struct CheckoutPipeline<C, S, N, F> {
    service: OrderService<C, S>,
    policy: DiscountPolicy,
    notification: N,
    fulfillment: F,
}

impl<C, S, N, F> CheckoutPipeline<C, S, N, F>
where
    C: ProductCatalog,
    S: OrderStore,
    N: NotificationService,
    F: FulfillmentService,
{
    /// Creates a new pipeline over the given ports.
    pub fn new(catalog: C, orders: S, notification: N, fulfillment: F) -> Self {
        Self {
            service: OrderService::new(catalog, orders),
            policy: DiscountPolicy::new(),
            notification,
            fulfillment,
        }
    }

    /// Returns the underlying order service.
    pub fn service(&self) -> &OrderService<C, S> {
        &self.service
    }

    /// Runs the checkout workflow for a customer and a set of order lines.
    ///
    /// Order and stock are persisted before delivery is scheduled and before
    /// the confirmation goes out; that ordering is part of the contract. A
    /// failure in a later step compensates the persisted effects and returns
    /// the original error.
    #[tracing::instrument(skip(self, customer, lines), fields(customer_id = %customer.id()))]
    pub async fn process_order(
        &self,
        customer: Customer,
        lines: &[OrderLine],
    ) -> Result<CheckoutReceipt> {
        metrics::counter!("checkout_attempts_total").increment(1);
        let started = std::time::Instant::now();

        let mut steps = Vec::new();

        // 1. Build the order and reserve stock in the working set.
        let (order, products) = self.service.build_order(customer, lines).await?;
        record(&mut steps, STEP_BUILD_ORDER);

        // 2. Discount from the policy.
        let discount = self.policy.calculate_discount(&order);
        record(&mut steps, STEP_COMPUTE_DISCOUNT);

        // 3. Shipping cost, forced to zero when free shipping applies.
        let free_shipping = self.policy.is_eligible_for_free_shipping(&order);
        let shipping_cost = if free_shipping {
            Money::zero(order.total_amount().currency())
        } else {
            self.fulfillment.calculate_shipping_cost(&order).await?
        };
        record(&mut steps, STEP_QUOTE_SHIPPING);

        // 4. Persist the order, then the reserved stock.
        self.service.orders().save(order.clone()).await?;
        let mut persisted: Vec<(ProductId, u32)> = Vec::new();
        for (product_id, product) in &products {
            if let Err(e) = self.service.catalog().update(product.clone()).await {
                self.compensate(&order, &persisted, STEP_PERSIST_ORDER).await?;
                return Err(e.into());
            }
            let reserved = order
                .get_item(product_id)
                .map(|item| item.quantity)
                .unwrap_or(0);
            persisted.push((product_id.clone(), reserved));
        }
        record(&mut steps, STEP_PERSIST_ORDER);

        // 5. Schedule delivery.
        if let Err(e) = self.fulfillment.schedule_delivery(&order).await {
            self.compensate(&order, &persisted, STEP_SCHEDULE_DELIVERY).await?;
            return Err(e);
        }
        record(&mut steps, STEP_SCHEDULE_DELIVERY);

        // 6. Confirmation, strictly after persistence.
        if let Err(e) = self
            .notification
            .send_order_confirmation(&order, order.customer(), discount)
            .await
        {
            self.compensate(&order, &persisted, STEP_SEND_CONFIRMATION).await?;
            return Err(e);
        }
        record(&mut steps, STEP_SEND_CONFIRMATION);

        metrics::counter!("checkout_completed_total").increment(1);
        metrics::histogram!("checkout_duration_seconds").record(started.elapsed().as_secs_f64());

        tracing::info!(
            order_id = %order.id(),
            total = %order.total_amount(),
            discount = %discount,
            shipping = %shipping_cost,
            "checkout completed"
        );

        Ok(CheckoutReceipt {
            order,
            discount,
            shipping_cost,
            free_shipping,
            steps,
        })
    }

    /// Undoes the persisted effects of a failed checkout: returns the
    /// reserved stock for every persisted product, then deletes the order.
    async fn compensate(
        &self,
        order: &Order,
        persisted: &[(ProductId, u32)],
        failed_step: &'static str,
    ) -> Result<()> {
        metrics::counter!("checkout_compensations_total").increment(1);
        tracing::warn!(order_id = %order.id(), step = failed_step, "compensating failed checkout");

        let mut restocked: HashMap<ProductId, Product> = HashMap::new();
        for (product_id, quantity) in persisted {
            let mut product = self
                .service
                .catalog()
                .find_by_id(product_id)
                .await
                .map_err(|e| compensation_failed(failed_step, &e))?
                .ok_or_else(|| CheckoutError::CompensationFailed {
                    step: failed_step,
                    reason: format!("product {product_id} vanished during compensation"),
                })?;
            product
                .update_stock(i64::from(*quantity))
                .map_err(|e| compensation_failed(failed_step, &e))?;
            restocked.insert(product_id.clone(), product);
        }
        for product in restocked.into_values() {
            self.service
                .catalog()
                .update(product)
                .await
                .map_err(|e| compensation_failed(failed_step, &e))?;
        }

        self.service
            .orders()
            .delete(order.id())
            .await
            .map_err(|e| compensation_failed(failed_step, &e))?;
        Ok(())
    }
}

fn record(steps: &mut Vec<StepRecord>, step: &'static str) {
    steps.push(StepRecord {
        step,
        completed_at: Utc::now(),
    });
}

fn compensation_failed(step: &'static str, error: &dyn std::fmt::Display) -> CheckoutError {
    CheckoutError::CompensationFailed {
        step,
        reason: error.to_string(),
    }
}
