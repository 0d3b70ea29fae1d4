//! Product detail state machine
//!
//! `Idle -> Loading -> {Success, NotFound, Error}`. Every fetch is tagged
//! with a generation number; a result is applied only if its generation is
//! still the latest, so a slow response for a previous product can never
//! overwrite the current one.

use serde::Serialize;

use crate::types::{Product, ProductId, RecoveryAction};

/// Where the detail view is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DetailStatus {
    #[default]
    Idle,
    Loading,
    Success(Product),
    /// The API has no such product
    NotFound,
    /// The request itself failed
    Error(String),
}

/// Handle for one in-flight fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    pub product_id: ProductId,
    pub generation: u64,
}

/// How a fetch ended.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Found(Product),
    NotFound,
    Failed(String),
}

/// Raw state of one detail view
#[derive(Debug, Clone, PartialEq)]
pub struct DetailState {
    pub product_id: Option<ProductId>,
    pub status: DetailStatus,
    /// Index into the product's images
    pub selected_image_index: usize,
    /// Stepper value, never below 1
    pub quantity: u32,
    generation: u64,
}

impl Default for DetailState {
    fn default() -> Self {
        Self {
            product_id: None,
            status: DetailStatus::Idle,
            selected_image_index: 0,
            quantity: 1,
            generation: 0,
        }
    }
}

impl DetailState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start fetching `product_id`, discarding everything about the previous
    /// product.
    pub fn begin(&mut self, product_id: ProductId) -> FetchTicket {
        self.generation += 1;
        self.product_id = Some(product_id);
        self.status = DetailStatus::Loading;
        self.selected_image_index = 0;
        self.quantity = 1;

        FetchTicket {
            product_id,
            generation: self.generation,
        }
    }

    /// Whether `ticket` belongs to the most recent fetch.
    pub fn is_current(&self, ticket: FetchTicket) -> bool {
        ticket.generation == self.generation && self.product_id == Some(ticket.product_id)
    }

    /// Apply the result of a fetch. Stale results are ignored and return false.
    pub fn resolve(&mut self, ticket: FetchTicket, outcome: FetchOutcome) -> bool {
        if !self.is_current(ticket) {
            tracing::debug!(
                product_id = ticket.product_id,
                generation = ticket.generation,
                current = self.generation,
                "ignoring stale product response"
            );
            return false;
        }

        self.status = match outcome {
            FetchOutcome::Found(product) if product.id == ticket.product_id => {
                DetailStatus::Success(product)
            }
            FetchOutcome::Found(product) => {
                tracing::warn!(
                    requested = ticket.product_id,
                    received = product.id,
                    "product response does not match the requested id"
                );
                DetailStatus::NotFound
            }
            FetchOutcome::NotFound => DetailStatus::NotFound,
            FetchOutcome::Failed(message) => DetailStatus::Error(message),
        };
        true
    }

    pub fn is_loading(&self) -> bool {
        self.status == DetailStatus::Loading
    }

    pub fn product(&self) -> Option<&Product> {
        match &self.status {
            DetailStatus::Success(product) => Some(product),
            _ => None,
        }
    }

    /// Select an image by index. Out-of-range indexes are rejected.
    pub fn select_image(&mut self, index: usize) -> bool {
        let Some(product) = self.product() else {
            return false;
        };
        if index >= product.images.len() || index == self.selected_image_index {
            return false;
        }
        self.selected_image_index = index;
        true
    }

    /// Step the quantity by `delta`, never going below 1.
    pub fn change_quantity(&mut self, delta: i64) {
        let next = (i64::from(self.quantity) + delta).clamp(1, i64::from(u32::MAX));
        self.quantity = u32::try_from(next).unwrap_or(u32::MAX);
    }
}

// ============================================================================
// View Model
// ============================================================================

/// Computed view model for rendering the detail view
#[derive(Debug, Clone, Serialize)]
pub struct DetailViewModel {
    pub loading: bool,
    /// User-facing failure text, if the view ended without a product
    pub error: Option<String>,
    pub product: Option<Product>,
    pub selected_image: Option<String>,
    pub selected_image_index: usize,
    pub quantity: u32,
    pub recovery: Option<RecoveryAction>,
}

/// Pure function: compute view model from state
pub fn compute_detail_view_model(state: &DetailState) -> DetailViewModel {
    let (error, recovery) = match &state.status {
        DetailStatus::NotFound => (
            Some("Product not found".to_string()),
            Some(RecoveryAction::BackToListing),
        ),
        DetailStatus::Error(message) => (
            Some(format!("Could not load product: {message}")),
            Some(RecoveryAction::BackToListing),
        ),
        DetailStatus::Idle | DetailStatus::Loading | DetailStatus::Success(_) => (None, None),
    };

    let product = state.product().cloned();
    let selected_image = product
        .as_ref()
        .and_then(|p| p.images.get(state.selected_image_index).cloned());

    DetailViewModel {
        loading: state.is_loading(),
        error,
        product,
        selected_image,
        selected_image_index: state.selected_image_index,
        quantity: state.quantity,
        recovery,
    }
}
