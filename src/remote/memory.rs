//! In-memory catalog provider.
//!
//! Serves a fixed product list, optionally loaded from a JSON fixture file.
//! Failures and latency can be injected so the listing and detail state
//! machines can be driven through every transition without a network.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use tokio::sync::RwLock;

use crate::error::{Result, StorefrontError};
use crate::types::{Product, ProductId};

use super::{CatalogSource, ProductLookup};

#[derive(Debug, Default)]
struct Faults {
    /// Message returned by every request while set
    failure: Option<String>,
    /// Latency applied to every request
    delay: Duration,
    /// Extra latency for single-product lookups, by id
    product_delays: HashMap<ProductId, Duration>,
}

/// Catalog backed by a product list held in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    products: Arc<RwLock<Vec<Product>>>,
    faults: Arc<RwLock<Faults>>,
    requests: Arc<AtomicUsize>,
}

impl MemoryCatalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            products: Arc::new(RwLock::new(products)),
            ..Default::default()
        }
    }

    /// Load a JSON array of products, as served by the catalog API.
    pub fn from_fixture(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            StorefrontError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read fixture at {}: {}", path.display(), e),
            ))
        })?;
        let products: Vec<Product> = serde_json::from_str(&content)?;
        Ok(Self::new(products))
    }

    /// Make every request fail with a transport error until cleared.
    pub async fn fail_with(&self, message: impl Into<String>) {
        self.faults.write().await.failure = Some(message.into());
    }

    pub async fn clear_failure(&self) {
        self.faults.write().await.failure = None;
    }

    /// Delay every response.
    pub async fn set_delay(&self, delay: Duration) {
        self.faults.write().await.delay = delay;
    }

    /// Delay responses for one product only.
    pub async fn set_product_delay(&self, id: ProductId, delay: Duration) {
        self.faults.write().await.product_delays.insert(id, delay);
    }

    /// Number of requests served so far.
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    async fn simulate(&self, id: Option<ProductId>) -> Result<()> {
        self.requests.fetch_add(1, Ordering::SeqCst);

        let (delay, failure) = {
            let faults = self.faults.read().await;
            let extra = id
                .and_then(|id| faults.product_delays.get(&id).copied())
                .unwrap_or_default();
            (faults.delay + extra, faults.failure.clone())
        };

        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        match failure {
            Some(message) => Err(StorefrontError::Io(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                message,
            ))),
            None => Ok(()),
        }
    }
}

impl CatalogSource for MemoryCatalog {
    async fn fetch_products(&self) -> Result<Vec<Product>> {
        self.simulate(None).await?;
        Ok(self.products.read().await.clone())
    }

    async fn fetch_product(&self, id: ProductId) -> Result<ProductLookup> {
        self.simulate(Some(id)).await?;
        let products = self.products.read().await;
        Ok(products
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .map_or(ProductLookup::NotFound, ProductLookup::Found))
    }
}
