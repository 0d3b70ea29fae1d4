//! Listing session: owns the fetched catalog, the debounced search and the
//! current page, and keeps them consistent.

use std::time::Duration;

use tokio::sync::{broadcast, watch};

use crate::config::Config;
use crate::debounce::Debouncer;
use crate::error::Result;
use crate::events::{EventBus, StoreEvent};
use crate::paginator::PageControlKind;
use crate::remote::CatalogSource;

use super::model::{
    CatalogAction, CatalogState, CatalogViewModel, compute_view_model, reduce_catalog_state,
};

/// Catalog listing pipeline: fetch, debounced filter, paginate.
///
/// Must be created inside a tokio runtime (the search debouncer spawns a
/// task). Dropping the store cancels any pending search.
pub struct CatalogStore<S> {
    source: S,
    state: CatalogState,
    search: Debouncer<String>,
    events: EventBus,
}

impl<S: CatalogSource> CatalogStore<S> {
    pub fn new(source: S, page_size: usize, debounce: Duration) -> Self {
        Self {
            source,
            state: CatalogState::new(page_size),
            search: Debouncer::new(String::new(), debounce),
            events: EventBus::new(),
        }
    }

    pub fn from_config(source: S, config: &Config) -> Self {
        Self::new(source, config.page_size(), config.debounce_delay())
    }

    /// Publish lifecycle events on a bus shared with other stores.
    pub fn with_events(mut self, events: EventBus) -> Self {
        self.events = events;
        self
    }

    fn dispatch(&mut self, action: CatalogAction) {
        let state = std::mem::take(&mut self.state);
        self.state = reduce_catalog_state(state, action);
    }

    /// Fetch the whole catalog.
    ///
    /// On failure the previous items are kept, the state records the error
    /// (offering a retry) and the error is also returned.
    pub async fn load(&mut self) -> Result<()> {
        self.dispatch(CatalogAction::LoadStarted);

        match self.source.fetch_products().await {
            Ok(products) => {
                let count = products.len();
                self.dispatch(CatalogAction::Loaded(products));
                tracing::info!(count, "catalog loaded");
                self.events.publish(StoreEvent::DatasetLoaded { count });
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Failed to fetch products: {e}");
                let message = e.to_string();
                self.dispatch(CatalogAction::LoadFailed(message.clone()));
                self.events.publish(StoreEvent::DatasetFailed { message });
                Err(e)
            }
        }
    }

    /// Record a keystroke: echo it and restart the debounce timer.
    pub fn set_search_term(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.dispatch(CatalogAction::UpdateSearch(text.clone()));
        self.search.push(text);
    }

    /// Empty the search box. Applied after the debounce like any input.
    pub fn clear_search(&mut self) {
        self.set_search_term(String::new());
    }

    /// Receiver of settled search terms, for callers that multiplex input.
    /// Feed what it yields to [`apply_search`](Self::apply_search).
    pub fn search_updates(&self) -> watch::Receiver<String> {
        self.search.subscribe()
    }

    /// Apply a settled search term: refilter and go back to page 1.
    pub fn apply_search(&mut self, term: String) {
        if term == self.state.debounced_term {
            return;
        }
        self.dispatch(CatalogAction::SearchSettled(term.clone()));
        tracing::debug!(term, matches = self.state.filtered.len(), "search applied");
        self.events.publish(StoreEvent::FilterApplied {
            term,
            matches: self.state.filtered.len(),
        });
    }

    /// Wait for the debouncer to settle on a new term and apply it.
    ///
    /// Returns the applied term, or `None` if the debouncer stopped.
    pub async fn settle_search(&mut self) -> Option<String> {
        let term = self.search.changed().await?;
        self.apply_search(term.clone());
        Some(term)
    }

    /// Move to `page`, clamped to the available pages.
    pub fn set_page(&mut self, page: usize) {
        let before = self.state.page;
        self.dispatch(CatalogAction::SetPage(page));
        if self.state.page != before {
            self.events.publish(StoreEvent::PageChanged {
                page: self.state.page,
                max_page: self.state.max_page(),
            });
        }
    }

    /// Activate a paginator control. Returns false if it is not shown.
    pub fn activate(&mut self, kind: PageControlKind) -> bool {
        match self.state.paginator().request(kind) {
            Some(target) => {
                self.set_page(target);
                true
            }
            None => false,
        }
    }

    pub fn state(&self) -> &CatalogState {
        &self.state
    }

    pub fn view(&self) -> CatalogViewModel {
        compute_view_model(&self.state)
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
    use crate::catalog::model::{EmptyStateKind, LoadStatus};
    use crate::remote::MemoryCatalog;
    use crate::types::{Category, Product, RecoveryAction};
    use tokio::time::{sleep, timeout};

    const DEBOUNCE: Duration = Duration::from_millis(500);

    fn make_product(id: u64, title: &str) -> Product {
        Product {
            id,
            title: title.to_string(),
            slug: String::new(),
            price: 50.0,
            description: String::new(),
            images: vec![String::new()],
            category: Category {
                id: 1,
                name: "Clothing".to_string(),
                slug: "clothing".to_string(),
                image: String::new(),
                creation_at: None,
                updated_at: None,
            },
            creation_at: None,
            updated_at: None,
        }
    }

    fn numbered_catalog(count: u64) -> MemoryCatalog {
        MemoryCatalog::new(
            (1..=count)
                .map(|i| make_product(i, &format!("Product {i}")))
                .collect(),
        )
    }

    fn visible_ids<S: CatalogSource>(store: &CatalogStore<S>) -> Vec<u64> {
        store.state().visible_items().iter().map(|p| p.id).collect()
    }

    #[tokio::test(start_paused = true)]
    async fn test_load_pages_through_catalog() {
        let mut store = CatalogStore::new(numbered_catalog(20), 9, DEBOUNCE);
        store.load().await.unwrap();

        assert_eq!(visible_ids(&store), (1..=9).collect::<Vec<_>>());
        assert_eq!(store.state().max_page(), 3);

        assert!(store.activate(PageControlKind::Next));
        assert_eq!(visible_ids(&store), (10..=18).collect::<Vec<_>>());

        assert!(store.activate(PageControlKind::Last));
        assert_eq!(visible_ids(&store), vec![19, 20]);
        assert!(!store.activate(PageControlKind::Next));
    }

    #[tokio::test(start_paused = true)]
    async fn test_typing_applies_only_settled_term() {
        let mut store = CatalogStore::new(numbered_catalog(20), 9, DEBOUNCE);
        store.load().await.unwrap();
        store.set_page(3);
        let mut events = store.subscribe();

        for partial in ["P", "Pro", "Product", "Product ", "Product 2"] {
            store.set_search_term(partial);
            sleep(Duration::from_millis(100)).await;
        }
        assert_eq!(store.state().search_term, "Product 2");
        assert_eq!(store.state().debounced_term, "");
        assert_eq!(store.state().page, 3);

        assert_eq!(store.settle_search().await.as_deref(), Some("Product 2"));
        assert_eq!(store.state().page, 1);
        assert_eq!(visible_ids(&store), vec![2, 20]);
        assert_eq!(store.state().max_page(), 1);

        assert_eq!(
            events.recv().await.unwrap(),
            StoreEvent::FilterApplied {
                term: "Product 2".to_string(),
                matches: 2
            }
        );

        // Only the final value was applied
        assert!(timeout(Duration::from_secs(2), store.settle_search()).await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_clear_search_restores_catalog() {
        let catalog = MemoryCatalog::new(vec![
            make_product(1, "Blue Jeans"),
            make_product(2, "Red Shirt"),
            make_product(3, "Green Hoodie"),
        ]);
        let mut store = CatalogStore::new(catalog, 9, DEBOUNCE);
        store.load().await.unwrap();

        store.set_search_term("purple");
        store.settle_search().await;
        let view = store.view();
        assert_eq!(
            view.empty_state.as_ref().and_then(EmptyStateKind::recovery),
            Some(RecoveryAction::ClearSearch)
        );

        store.clear_search();
        assert_eq!(store.state().search_term, "");
        store.settle_search().await;
        assert_eq!(visible_ids(&store), vec![1, 2, 3]);
        assert_eq!(store.view().empty_state, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_search_is_case_insensitive() {
        let catalog = MemoryCatalog::new(vec![
            make_product(1, "Blue Jeans"),
            make_product(2, "Red Shirt"),
        ]);
        let mut store = CatalogStore::new(catalog, 9, DEBOUNCE);
        store.load().await.unwrap();

        store.set_search_term("BLUE");
        store.settle_search().await;
        assert_eq!(visible_ids(&store), vec![1]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_load_surfaces_retry_then_recovers() {
        let catalog = numbered_catalog(4);
        catalog.fail_with("connection refused").await;
        let mut store = CatalogStore::new(catalog.clone(), 9, DEBOUNCE);
        let mut events = store.subscribe();

        assert!(store.load().await.is_err());
        assert!(!store.state().is_loading());
        assert!(matches!(store.state().status, LoadStatus::Failed(_)));
        assert_eq!(
            store.view().empty_state.as_ref().and_then(EmptyStateKind::recovery),
            Some(RecoveryAction::Retry)
        );
        assert!(matches!(
            events.recv().await.unwrap(),
            StoreEvent::DatasetFailed { .. }
        ));

        catalog.clear_failure().await;
        store.load().await.unwrap();
        assert_eq!(store.state().status, LoadStatus::Loaded);
        assert_eq!(visible_ids(&store), vec![1, 2, 3, 4]);
        assert_eq!(
            events.recv().await.unwrap(),
            StoreEvent::DatasetLoaded { count: 4 }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_search_before_load_applies_to_loaded_data() {
        let mut store = CatalogStore::new(numbered_catalog(20), 9, DEBOUNCE);
        store.set_search_term("Product 1");
        store.settle_search().await;
        assert!(store.state().filtered.is_empty());

        store.load().await.unwrap();
        assert_eq!(store.state().filtered.len(), 11);
    }

    #[tokio::test(start_paused = true)]
    async fn test_page_changes_publish_events() {
        let mut store = CatalogStore::new(numbered_catalog(20), 9, DEBOUNCE);
        store.load().await.unwrap();
        let mut events = store.subscribe();

        store.set_page(2);
        store.set_page(2);
        store.set_page(50);

        assert_eq!(
            events.recv().await.unwrap(),
            StoreEvent::PageChanged {
                page: 2,
                max_page: 3
            }
        );
        assert_eq!(
            events.recv().await.unwrap(),
            StoreEvent::PageChanged {
                page: 3,
                max_page: 3
            }
        );
        assert!(events.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_search_updates_receiver_sees_settled_term() {
        let mut store = CatalogStore::new(numbered_catalog(3), 9, DEBOUNCE);
        store.load().await.unwrap();
        let mut updates = store.search_updates();

        store.set_search_term("Product 3");
        updates.changed().await.unwrap();
        let term = updates.borrow_and_update().clone();
        store.apply_search(term);
        assert_eq!(visible_ids(&store), vec![3]);
    }
}
