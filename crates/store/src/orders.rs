//! Order store port and in-memory implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use domain::{CustomerId, Order, OrderId};
use tokio::sync::RwLock;

use crate::error::{Result, StoreError};

/// Port for persisting the order aggregate.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Finds an order by ID.
    async fn find_by_id(&self, id: OrderId) -> Result<Option<Order>>;

    /// Stores a new order.
    async fn save(&self, order: Order) -> Result<()>;

    /// Updates an existing order.
    ///
    /// The update is rejected with [`StoreError::VersionConflict`] if the
    /// given order's version does not match the stored one. On success the
    /// stored copy carries the next version, which is returned.
    async fn update(&self, order: Order) -> Result<Order>;

    /// Deletes an order.
    async fn delete(&self, id: OrderId) -> Result<()>;

    /// Returns every order placed by a customer.
    async fn find_by_customer(&self, customer_id: CustomerId) -> Result<Vec<Order>>;
}

/// In-memory order store for tests and orchestration.
#[derive(Clone, Default)]
pub struct InMemoryOrderStore {
    orders: Arc<RwLock<HashMap<OrderId, Order>>>,
}

impl InMemoryOrderStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored orders.
    pub async fn order_count(&self) -> usize {
        self.orders.read().await.len()
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn find_by_id(&self, id: OrderId) -> Result<Option<Order>> {
        Ok(self.orders.read().await.get(&id).cloned())
    }

    async fn save(&self, order: Order) -> Result<()> {
        self.orders.write().await.insert(order.id(), order);
        Ok(())
    }

    async fn update(&self, order: Order) -> Result<Order> {
        let mut orders = self.orders.write().await;
        let stored = orders.get(&order.id()).ok_or_else(|| StoreError::Missing {
            entity: "Order",
            id: order.id().to_string(),
        })?;

        if stored.version() != order.version() {
            return Err(StoreError::VersionConflict {
                entity: "Order",
                id: order.id().to_string(),
                expected: stored.version(),
                actual: order.version(),
            });
        }

        let mut updated = order;
        updated.set_version(updated.version().next());
        orders.insert(updated.id(), updated.clone());
        Ok(updated)
    }

    async fn delete(&self, id: OrderId) -> Result<()> {
        self.orders
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| StoreError::Missing {
                entity: "Order",
                id: id.to_string(),
            })
    }

    async fn find_by_customer(&self, customer_id: CustomerId) -> Result<Vec<Order>> {
        let orders = self.orders.read().await;
        let mut matching: Vec<Order> = orders
            .values()
            .filter(|order| order.customer_id() == customer_id)
            .cloned()
            .collect();
        matching.sort_by_key(Order::created_at);
        Ok(matching)
    }
}
