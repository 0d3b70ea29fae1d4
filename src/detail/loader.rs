//! Fetch orchestration for the product detail view.

use tokio::sync::broadcast;

use crate::events::{EventBus, StoreEvent};
use crate::remote::{CatalogSource, ProductLookup};
use crate::types::ProductId;

use super::model::{
    DetailState, DetailViewModel, FetchOutcome, FetchTicket, compute_detail_view_model,
};

/// Fetch one product and classify the result.
///
/// Transport failures become `Failed`; the loader never leaves the caller
/// without a terminal outcome.
pub async fn fetch_outcome<S: CatalogSource>(source: &S, id: ProductId) -> FetchOutcome {
    match source.fetch_product(id).await {
        Ok(ProductLookup::Found(product)) => FetchOutcome::Found(product),
        Ok(ProductLookup::NotFound) => FetchOutcome::NotFound,
        Err(e) => {
            tracing::warn!("Failed to fetch product {id}: {e}");
            FetchOutcome::Failed(e.to_string())
        }
    }
}

/// Loads products into a [`DetailState`].
pub struct DetailLoader<S> {
    source: S,
    state: DetailState,
    events: EventBus,
}

impl<S: CatalogSource> DetailLoader<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            state: DetailState::new(),
            events: EventBus::new(),
        }
    }

    /// Publish lifecycle events on a bus shared with other stores.
    pub fn with_events(mut self, events: EventBus) -> Self {
        self.events = events;
        self
    }

    /// Show `id`: enter Loading, fetch, and apply the result.
    pub async fn open(&mut self, id: ProductId) -> &DetailState {
        let ticket = self.begin(id);
        let outcome = fetch_outcome(&self.source, id).await;
        self.complete(ticket, outcome);
        &self.state
    }

    /// Enter Loading for `id` without fetching. Pair with
    /// [`complete`](Self::complete) when the fetch runs elsewhere.
    pub fn begin(&mut self, id: ProductId) -> FetchTicket {
        self.state.begin(id)
    }

    /// Apply a fetch result. Returns false for a superseded ticket.
    pub fn complete(&mut self, ticket: FetchTicket, outcome: FetchOutcome) -> bool {
        let found = matches!(outcome, FetchOutcome::Found(_));
        if !self.state.resolve(ticket, outcome) {
            return false;
        }

        let event = if found && self.state.product().is_some() {
            StoreEvent::ProductLoaded {
                id: ticket.product_id,
            }
        } else {
            StoreEvent::ProductUnavailable {
                id: ticket.product_id,
            }
        };
        self.events.publish(event);
        true
    }

    pub fn select_image(&mut self, index: usize) -> bool {
        let changed = self.state.select_image(index);
        if changed {
            self.events.publish(StoreEvent::ImageChanged { index });
        }
        changed
    }

    pub fn change_quantity(&mut self, delta: i64) {
        self.state.change_quantity(delta);
    }

    pub fn state(&self) -> &DetailState {
        &self.state
    }

    pub fn view(&self) -> DetailViewModel {
        compute_detail_view_model(&self.state)
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detail::model::DetailStatus;
    use crate::remote::MemoryCatalog;
    use crate::types::{Category, Product, RecoveryAction};
    use std::time::Duration;

    fn make_product(id: u64) -> Product {
        Product {
            id,
            title: format!("Product {id}"),
            slug: String::new(),
            price: 15.0,
            description: String::new(),
            images: vec![format!("https://img/{id}/0"), format!("https://img/{id}/1")],
            category: Category {
                id: 1,
                name: "Shoes".to_string(),
                slug: "shoes".to_string(),
                image: String::new(),
                creation_at: None,
                updated_at: None,
            },
            creation_at: None,
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn test_open_found() {
        let mut loader = DetailLoader::new(MemoryCatalog::new(vec![make_product(1)]));
        let mut events = loader.subscribe();

        let state = loader.open(1).await;
        assert_eq!(state.product().unwrap().title, "Product 1");
        assert_eq!(
            events.recv().await.unwrap(),
            StoreEvent::ProductLoaded { id: 1 }
        );
    }

    #[tokio::test]
    async fn test_open_missing_is_not_found() {
        let mut loader = DetailLoader::new(MemoryCatalog::new(vec![make_product(1)]));
        let state = loader.open(2).await;
        assert_eq!(state.status, DetailStatus::NotFound);
        assert_eq!(loader.view().recovery, Some(RecoveryAction::BackToListing));
    }

    #[tokio::test]
    async fn test_transport_failure_is_terminal_error() {
        let catalog = MemoryCatalog::new(vec![make_product(1)]);
        catalog.fail_with("dns failure").await;
        let mut loader = DetailLoader::new(catalog);

        let state = loader.open(1).await;
        assert!(!state.is_loading());
        assert!(matches!(&state.status, DetailStatus::Error(m) if m.contains("dns failure")));
        assert_eq!(loader.view().recovery, Some(RecoveryAction::BackToListing));
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_first_response_cannot_overwrite_second() {
        let catalog = MemoryCatalog::new(vec![make_product(1), make_product(2)]);
        catalog.set_product_delay(1, Duration::from_millis(800)).await;
        catalog.set_product_delay(2, Duration::from_millis(100)).await;
        let mut loader = DetailLoader::new(catalog.clone());

        let first = loader.begin(1);
        let second = loader.begin(2);
        let (slow, fast) = tokio::join!(
            fetch_outcome(&catalog, first.product_id),
            fetch_outcome(&catalog, second.product_id),
        );

        // Apply in arrival order: fast (2) first, then the stale slow one (1)
        assert!(loader.complete(second, fast));
        assert!(!loader.complete(first, slow));
        assert_eq!(loader.state().product().unwrap().id, 2);
    }

    #[tokio::test]
    async fn test_select_image_publishes_event() {
        let mut loader = DetailLoader::new(MemoryCatalog::new(vec![make_product(1)]));
        loader.open(1).await;
        let mut events = loader.subscribe();

        assert!(loader.select_image(1));
        assert!(!loader.select_image(5));
        assert_eq!(
            events.recv().await.unwrap(),
            StoreEvent::ImageChanged { index: 1 }
        );
        assert_eq!(loader.view().selected_image.as_deref(), Some("https://img/1/1"));
    }

    #[tokio::test]
    async fn test_quantity_stepper() {
        let mut loader = DetailLoader::new(MemoryCatalog::new(vec![make_product(1)]));
        loader.open(1).await;
        loader.change_quantity(-1);
        assert_eq!(loader.view().quantity, 1);
        loader.change_quantity(2);
        assert_eq!(loader.view().quantity, 3);
    }
}
