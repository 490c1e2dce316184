//! Product catalog port and in-memory implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use domain::{Product, ProductId};
use tokio::sync::RwLock;

use crate::error::{Result, StoreError};

/// Port for catalog lookups and product persistence.
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    /// Finds a product by ID.
    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>>;

    /// Stores a new product.
    async fn save(&self, product: Product) -> Result<()>;

    /// Updates an existing product.
    ///
    /// The update is rejected with [`StoreError::VersionConflict`] if the
    /// given product's version does not match the stored one. On success the
    /// stored copy carries the next version, which is returned.
    async fn update(&self, product: Product) -> Result<Product>;
}

/// In-memory product catalog for tests and orchestration.
#[derive(Clone, Default)]
pub struct InMemoryProductCatalog {
    products: Arc<RwLock<HashMap<ProductId, Product>>>,
}

impl InMemoryProductCatalog {
    /// Creates a new empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalog pre-seeded with products.
    pub async fn with_products(products: impl IntoIterator<Item = Product>) -> Self {
        let catalog = Self::new();
        {
            let mut map = catalog.products.write().await;
            for product in products {
                map.insert(product.id().clone(), product);
            }
        }
        catalog
    }

    /// Returns the number of products in the catalog.
    pub async fn product_count(&self) -> usize {
        self.products.read().await.len()
    }

    /// Returns the stock level for a product, if present.
    pub async fn stock_of(&self, id: &ProductId) -> Option<u32> {
        self.products.read().await.get(id).map(Product::stock)
    }
}

#[async_trait]
impl ProductCatalog for InMemoryProductCatalog {
    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>> {
        Ok(self.products.read().await.get(id).cloned())
    }

    async fn save(&self, product: Product) -> Result<()> {
        self.products
            .write()
            .await
            .insert(product.id().clone(), product);
        Ok(())
    }

    async fn update(&self, product: Product) -> Result<Product> {
        let mut products = self.products.write().await;
        let stored = products
            .get(product.id())
            .ok_or_else(|| StoreError::Missing {
                entity: "Product",
                id: product.id().to_string(),
            })?;

        if stored.version() != product.version() {
            return Err(StoreError::VersionConflict {
                entity: "Product",
                id: product.id().to_string(),
                expected: stored.version(),
                actual: product.version(),
            });
        }

        let mut updated = product;
        updated.set_version(updated.version().next());
        products.insert(updated.id().clone(), updated.clone());
        Ok(updated)
    }
}
