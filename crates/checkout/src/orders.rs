//! Order application service: creation and status-transition workflows.

use std::collections::HashMap;

use domain::{Customer, CustomerId, Order, OrderId, Product, ProductId, inventory};
use store::{OrderStore, ProductCatalog};

use crate::error::{CheckoutError, Result};

/// A requested order line: product reference plus quantity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLine {
    /// The product to order.
    pub product_id: ProductId,

    /// Units requested, at least 1.
    pub quantity: u32,
}

impl OrderLine {
    /// Creates a new order line request.
    pub fn new(product_id: impl Into<ProductId>, quantity: u32) -> Self {
        Self {
            product_id: product_id.into(),
            quantity,
        }
    }
}

/// Service for creating orders and driving their status transitions.
///
/// Works against the storage ports only; all business rules live in the
/// aggregate and the inventory module.
pub struct OrderService<C, S> {
    catalog: C,
    orders: S,
}

impl<C: ProductCatalog, S: OrderStore> OrderService<C, S> {
    /// Creates a new order service over the given ports.
    pub fn new(catalog: C, orders: S) -> Self {
        Self { catalog, orders }
    }

    /// Returns the catalog port.
    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Returns the order store port.
    pub fn orders(&self) -> &S {
        &self.orders
    }

    /// Builds an order in memory without persisting anything.
    ///
    /// Every product is resolved up front, failing with
    /// [`CheckoutError::ProductNotFound`] on the first unresolved ID. Stock
    /// reservations are applied to the returned working set; the caller
    /// decides when to persist order and products.
    pub async fn build_order(
        &self,
        customer: Customer,
        lines: &[OrderLine],
    ) -> Result<(Order, HashMap<ProductId, Product>)> {
        let mut products = self.resolve_products(lines.iter().map(|l| &l.product_id)).await?;

        let mut order = Order::create(customer);
        for line in lines {
            let product = products
                .get(&line.product_id)
                .ok_or_else(|| CheckoutError::ProductNotFound(line.product_id.clone()))?;
            let movement = order.add_item(product, line.quantity)?;
            inventory::apply_movements(&mut products, std::slice::from_ref(&movement))?;
        }

        Ok((order, products))
    }

    /// Creates and persists an order for a customer.
    #[tracing::instrument(skip(self, customer), fields(customer_id = %customer.id()))]
    pub async fn create_order(&self, customer: Customer, lines: &[OrderLine]) -> Result<Order> {
        let (order, products) = self.build_order(customer, lines).await?;

        self.orders.save(order.clone()).await?;
        for product in products.into_values() {
            self.catalog.update(product).await?;
        }

        tracing::info!(order_id = %order.id(), total = %order.total_amount(), "order created");
        Ok(order)
    }

    /// Confirms a pending order.
    #[tracing::instrument(skip(self))]
    pub async fn confirm_order(&self, order_id: OrderId) -> Result<Order> {
        let mut order = self.load(order_id).await?;
        order.confirm()?;
        Ok(self.orders.update(order).await?)
    }

    /// Ships a confirmed order.
    #[tracing::instrument(skip(self))]
    pub async fn ship_order(&self, order_id: OrderId) -> Result<Order> {
        let mut order = self.load(order_id).await?;
        order.ship()?;
        Ok(self.orders.update(order).await?)
    }

    /// Marks a shipped order as delivered.
    #[tracing::instrument(skip(self))]
    pub async fn deliver_order(&self, order_id: OrderId) -> Result<Order> {
        let mut order = self.load(order_id).await?;
        order.deliver()?;
        Ok(self.orders.update(order).await?)
    }

    /// Cancels an order, releasing the stock of every line.
    ///
    /// All of the order's products are resolved before any stock moves, and
    /// the release batch is applied all or nothing. Restocked products are
    /// persisted before the cancelled order, so a reader never observes a
    /// cancelled order whose stock has not been returned.
    #[tracing::instrument(skip(self))]
    pub async fn cancel_order(&self, order_id: OrderId) -> Result<Order> {
        let mut order = self.load(order_id).await?;
        let mut products = self
            .resolve_products(order.items().iter().map(|item| &item.product_id))
            .await?;

        let movements = order.cancel()?;
        inventory::apply_movements(&mut products, &movements)?;

        for product in products.into_values() {
            self.catalog.update(product).await?;
        }
        let order = self.orders.update(order).await?;

        tracing::info!(order_id = %order.id(), "order cancelled, stock released");
        Ok(order)
    }

    /// Returns an order by ID.
    pub async fn get_order(&self, order_id: OrderId) -> Result<Order> {
        self.load(order_id).await
    }

    /// Returns every order placed by a customer.
    pub async fn orders_for_customer(&self, customer_id: CustomerId) -> Result<Vec<Order>> {
        Ok(self.orders.find_by_customer(customer_id).await?)
    }

    async fn load(&self, order_id: OrderId) -> Result<Order> {
        self.orders
            .find_by_id(order_id)
            .await?
            .ok_or(CheckoutError::OrderNotFound(order_id))
    }

    async fn resolve_products(
        &self,
        ids: impl Iterator<Item = &ProductId>,
    ) -> Result<HashMap<ProductId, Product>> {
        let mut products = HashMap::new();
        for id in ids {
            if products.contains_key(id) {
                continue;
            }
            let product = self
                .catalog
                .find_by_id(id)
                .await?
                .ok_or_else(|| CheckoutError::ProductNotFound(id.clone()))?;
            products.insert(id.clone(), product);
        }
        Ok(products)
    }
}
