//! Catalog provider backed by the product REST API.
//!
//! - `GET <base_url>` returns the full catalog as a JSON array
//! - `GET <base_url>/{id}` returns one product, or an error status / a body
//!   without an `id` when the product does not exist

use std::time::Duration;

use reqwest::{Client, StatusCode};
use url::Url;

use crate::config::Config;
use crate::error::{Result, StorefrontError};
use crate::types::{Product, ProductId};

use super::{CatalogSource, ProductLookup};

/// HTTP client for the product catalog API
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    client: Client,
    base_url: Url,
}

impl HttpCatalog {
    /// Create a provider from configuration
    ///
    /// Configures the HTTP client with the configured total timeout and a
    /// connect timeout capped at 10s.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(&config.api_url(), config.remote_timeout())
    }

    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(base_url)?;
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout.min(Duration::from_secs(10)))
            .build()?;

        Ok(Self { client, base_url })
    }

    /// URL of a single product: the base path with `/{id}` appended.
    pub fn product_url(&self, id: ProductId) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                StorefrontError::Config(format!(
                    "catalog URL '{}' cannot have a path",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .push(&id.to_string());
        Ok(url)
    }
}

impl CatalogSource for HttpCatalog {
    async fn fetch_products(&self) -> Result<Vec<Product>> {
        tracing::debug!(url = %self.base_url, "fetching catalog");
        let response = self.client.get(self.base_url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(StorefrontError::Api {
                status: status.as_u16(),
                message: status
                    .canonical_reason()
                    .unwrap_or("unexpected status")
                    .to_string(),
            });
        }

        let body = response.bytes().await?;
        let products: Vec<Product> = serde_json::from_slice(&body)?;
        tracing::debug!(count = products.len(), "catalog fetched");
        Ok(products)
    }

    async fn fetch_product(&self, id: ProductId) -> Result<ProductLookup> {
        let url = self.product_url(id)?;
        tracing::debug!(%url, "fetching product");
        let response = self.client.get(url).send().await?;

        let status = response.status();
        let body = response.bytes().await?;
        Ok(parse_product_response(id, status, &body))
    }
}

/// Interpret a single-product response.
///
/// Any non-success status, unparseable body, or body without a numeric `id`
/// counts as not found.
pub fn parse_product_response(id: ProductId, status: StatusCode, body: &[u8]) -> ProductLookup {
    if !status.is_success() {
        tracing::debug!(id, %status, "product lookup returned non-success status");
        return ProductLookup::NotFound;
    }

    let value: serde_json::Value = match serde_json::from_slice(body) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(id, "product payload is not JSON: {e}");
            return ProductLookup::NotFound;
        }
    };

    // A zero id is as good as a missing one
    let has_id = value
        .get("id")
        .and_then(serde_json::Value::as_u64)
        .is_some_and(|payload_id| payload_id != 0);
    if !has_id {
        tracing::warn!(id, "product payload has no valid identifier");
        return ProductLookup::NotFound;
    }

    match serde_json::from_value::<Product>(value) {
        Ok(product) => ProductLookup::Found(product),
        Err(e) => {
            tracing::warn!(id, "product payload is malformed: {e}");
            ProductLookup::NotFound
        }
    }
}
