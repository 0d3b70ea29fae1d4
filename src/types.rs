//! Catalog domain types as served by the product API.

use serde::{Deserialize, Serialize};

/// Product identifier as assigned by the catalog API.
pub type ProductId = u64;

/// Default number of products shown per listing page.
pub const DEFAULT_PAGE_SIZE: usize = 9;

/// Default quiet period before a search term is applied.
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;

/// Product category, embedded verbatim in every product payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub creation_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    #[serde(default)]
    pub slug: String,
    pub price: f64,
    #[serde(default)]
    pub description: String,
    /// Image URLs; renderers assume at least one entry.
    #[serde(default)]
    pub images: Vec<String>,
    pub category: Category,
    #[serde(default)]
    pub creation_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Product {
    /// Image shown on listing cards.
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    /// Price as rendered on cards and the detail view.
    pub fn price_label(&self) -> String {
        format!("€ {}", self.price)
    }
}

/// User-initiated recovery offered alongside a non-success state.
///
/// The listing and detail views share this so every failure surface looks
/// the same to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecoveryAction {
    /// Re-issue the failed catalog fetch.
    Retry,
    /// Reset the search term to show the whole catalog.
    ClearSearch,
    /// Leave the detail view and return to the listing.
    BackToListing,
}

impl RecoveryAction {
    pub fn label(self) -> &'static str {
        match self {
            RecoveryAction::Retry => "Retry",
            RecoveryAction::ClearSearch => "Clear Search",
            RecoveryAction::BackToListing => "Back to Shop",
        }
    }
}
