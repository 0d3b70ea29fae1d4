//! Product catalog collaborators.
//!
//! The listing and detail views only talk to a `CatalogSource`. The HTTP
//! implementation talks to the real API; the in-memory one backs tests and
//! offline fixtures.

pub mod http;
pub mod memory;

use std::path::Path;

use crate::config::Config;
use crate::error::Result;
use crate::types::{Product, ProductId};

pub use http::HttpCatalog;
pub use memory::MemoryCatalog;

/// Result of looking up a single product.
#[derive(Debug, Clone, PartialEq)]
pub enum ProductLookup {
    Found(Product),
    /// The API answered but has no such product (non-success status or a
    /// payload without a valid identifier)
    NotFound,
}

/// Common interface for product catalog backends
pub trait CatalogSource: Send + Sync {
    /// Fetch the whole catalog in one response
    fn fetch_products(&self) -> impl std::future::Future<Output = Result<Vec<Product>>> + Send;

    /// Fetch one product by identifier
    ///
    /// `Err` is reserved for transport failures; absence is `Ok(NotFound)`.
    fn fetch_product(
        &self,
        id: ProductId,
    ) -> impl std::future::Future<Output = Result<ProductLookup>> + Send;
}

impl<S: CatalogSource> CatalogSource for &S {
    fn fetch_products(&self) -> impl std::future::Future<Output = Result<Vec<Product>>> + Send {
        (**self).fetch_products()
    }

    fn fetch_product(
        &self,
        id: ProductId,
    ) -> impl std::future::Future<Output = Result<ProductLookup>> + Send {
        (**self).fetch_product(id)
    }
}

/// Backend selected at startup: the live API, or a fixture file.
#[derive(Debug, Clone)]
pub enum Catalog {
    Http(HttpCatalog),
    Memory(MemoryCatalog),
}

impl Catalog {
    /// Serve products from `fixture` when given, otherwise from the
    /// configured API.
    pub fn from_config(config: &Config, fixture: Option<&Path>) -> Result<Self> {
        match fixture {
            Some(path) => {
                tracing::debug!(path = %path.display(), "using catalog fixture");
                Ok(Catalog::Memory(MemoryCatalog::from_fixture(path)?))
            }
            None => Ok(Catalog::Http(HttpCatalog::from_config(config)?)),
        }
    }
}

impl CatalogSource for Catalog {
    async fn fetch_products(&self) -> Result<Vec<Product>> {
        match self {
            Catalog::Http(http) => http.fetch_products().await,
            Catalog::Memory(memory) => memory.fetch_products().await,
        }
    }

    async fn fetch_product(&self, id: ProductId) -> Result<ProductLookup> {
        match self {
            Catalog::Http(http) => http.fetch_product(id).await,
            Catalog::Memory(memory) => memory.fetch_product(id).await,
        }
    }
}
