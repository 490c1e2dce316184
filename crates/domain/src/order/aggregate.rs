//! Order aggregate implementation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::customer::Customer;
use crate::ids::{CustomerId, OrderId, ProductId};
use crate::inventory::StockMovement;
use crate::money::{Currency, Money, MoneyError};
use crate::product::Product;
use crate::version::Version;

use super::{OrderError, OrderStatus};

/// A line in an order, snapshotting the product price at add time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    /// The product this line refers to.
    pub product_id: ProductId,

    /// Human-readable product name at add time.
    pub product_name: String,

    /// Quantity ordered, always positive.
    pub quantity: u32,

    /// Price per unit snapshotted when the line was first added.
    pub unit_price: Money,
}

impl OrderItem {
    /// Creates a new order item.
    pub fn new(
        product_id: impl Into<ProductId>,
        product_name: impl Into<String>,
        quantity: u32,
        unit_price: Money,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            product_name: product_name.into(),
            quantity,
            unit_price,
        }
    }

    /// Returns the total contribution of this line (quantity x unit price).
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply(self.quantity)
    }
}

/// Order aggregate root.
///
/// Holds the item lines, the derived total, and the status state machine.
/// Stock side effects are not performed here: operations that reserve or
/// release stock return [`StockMovement`] events for a coordinating layer
/// to apply to the products it loaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    id: OrderId,
    customer: Customer,
    items: Vec<OrderItem>,
    total_amount: Money,
    status: OrderStatus,
    created_at: DateTime<Utc>,
    #[serde(default)]
    version: Version,
}

// Query methods
impl Order {
    /// Returns the order ID.
    pub fn id(&self) -> OrderId {
        self.id
    }

    /// Returns the customer who placed the order.
    pub fn customer(&self) -> &Customer {
        &self.customer
    }

    /// Returns the customer ID.
    pub fn customer_id(&self) -> CustomerId {
        self.customer.id()
    }

    /// Returns the item lines in insertion order.
    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    /// Returns the line for a product, if present.
    pub fn get_item(&self, product_id: &ProductId) -> Option<&OrderItem> {
        self.items.iter().find(|item| &item.product_id == product_id)
    }

    /// Returns the number of item lines.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Returns the total quantity across all lines.
    pub fn total_quantity(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// Returns the derived order total.
    pub fn total_amount(&self) -> Money {
        self.total_amount
    }

    /// Returns the current status.
    pub fn status(&self) -> OrderStatus {
        self.status
    }

    /// Returns when the order was created.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns true if the order has at least one line.
    pub fn has_items(&self) -> bool {
        !self.items.is_empty()
    }

    /// Returns the version used for optimistic concurrency.
    pub fn version(&self) -> Version {
        self.version
    }

    /// Sets the version. Called by the storage layer after a successful update.
    pub fn set_version(&mut self, version: Version) {
        self.version = version;
    }
}

// Command methods
impl Order {
    /// Creates a new pending order for a customer.
    pub fn create(customer: Customer) -> Self {
        Self::with_id(OrderId::new(), customer)
    }

    /// Creates a new pending order with a caller-supplied ID.
    pub fn with_id(id: OrderId, customer: Customer) -> Self {
        Self {
            id,
            customer,
            items: Vec::new(),
            total_amount: Money::zero(Currency::default()),
            status: OrderStatus::Pending,
            created_at: Utc::now(),
            version: Version::initial(),
        }
    }

    /// Adds `quantity` units of a product to the order.
    ///
    /// If a line for the product already exists its quantity is merged,
    /// otherwise a new line snapshots the product's current price. On success
    /// the total is recomputed and a `StockReserved` movement is returned;
    /// on failure neither the lines nor the total change.
    pub fn add_item(
        &mut self,
        product: &Product,
        quantity: u32,
    ) -> Result<StockMovement, OrderError> {
        if quantity == 0 {
            return Err(OrderError::InvalidQuantity { quantity });
        }
        if product.stock() < quantity {
            return Err(OrderError::InsufficientStock {
                product_id: product.id().clone(),
                requested: quantity,
                available: product.stock(),
            });
        }

        // Stage the change so a total recomputation failure (currency
        // mismatch) cannot leave the lines half updated.
        let mut items = self.items.clone();
        match items
            .iter_mut()
            .find(|item| item.product_id == *product.id())
        {
            Some(existing) => existing.quantity += quantity,
            None => items.push(OrderItem::new(
                product.id().clone(),
                product.name(),
                quantity,
                product.price(),
            )),
        }
        let total_amount = Self::total_of(&items)?;

        self.items = items;
        self.total_amount = total_amount;

        Ok(StockMovement::Reserved {
            product_id: product.id().clone(),
            quantity,
        })
    }

    /// Confirms a pending order.
    pub fn confirm(&mut self) -> Result<(), OrderError> {
        if !self.status.can_confirm() {
            return Err(OrderError::IllegalTransition {
                status: self.status,
                action: "confirm",
            });
        }
        self.status = OrderStatus::Confirmed;
        Ok(())
    }

    /// Ships a confirmed order.
    pub fn ship(&mut self) -> Result<(), OrderError> {
        if !self.status.can_ship() {
            return Err(OrderError::IllegalTransition {
                status: self.status,
                action: "ship",
            });
        }
        self.status = OrderStatus::Shipped;
        Ok(())
    }

    /// Marks a shipped order as delivered.
    pub fn deliver(&mut self) -> Result<(), OrderError> {
        if !self.status.can_deliver() {
            return Err(OrderError::IllegalTransition {
                status: self.status,
                action: "deliver",
            });
        }
        self.status = OrderStatus::Delivered;
        Ok(())
    }

    /// Cancels the order.
    ///
    /// Returns one `StockReleased` movement per line. The caller applies the
    /// movements as a batch; the releases and the cancelled status must be
    /// committed together or not at all.
    pub fn cancel(&mut self) -> Result<Vec<StockMovement>, OrderError> {
        if !self.status.can_cancel() {
            return Err(OrderError::IllegalTransition {
                status: self.status,
                action: "cancel",
            });
        }
        let movements = self
            .items
            .iter()
            .map(|item| StockMovement::Released {
                product_id: item.product_id.clone(),
                quantity: item.quantity,
            })
            .collect();
        self.status = OrderStatus::Cancelled;
        Ok(movements)
    }

    fn total_of(items: &[OrderItem]) -> Result<Money, MoneyError> {
        items.iter().try_fold(
            Money::zero(Currency::default()),
            |total, item| total.add(item.line_total()),
        )
    }
}
