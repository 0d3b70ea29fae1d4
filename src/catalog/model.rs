//! Catalog listing model types for testable state management
//!
//! This module separates state (CatalogState) from view (CatalogViewModel).
//! `filtered` is the only stored derived value; page count and the visible
//! window are recomputed from it on demand.

use serde::Serialize;

use crate::paginator::{PageControl, Paginator, page_count, page_window};
use crate::types::{DEFAULT_PAGE_SIZE, Product, RecoveryAction};

use super::filter::filter_by_title;

// ============================================================================
// State Types
// ============================================================================

/// Progress of the catalog fetch.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadStatus {
    /// No fetch has been issued yet
    #[default]
    Idle,
    /// A fetch is in flight
    Loading,
    /// The last fetch succeeded
    Loaded,
    /// The last fetch failed; the message is user-facing
    Failed(String),
}

/// Raw state of one listing session
#[derive(Debug, Clone)]
pub struct CatalogState {
    /// Full catalog from the last successful fetch
    pub all_items: Vec<Product>,
    /// Search box contents, echoed on every keystroke
    pub search_term: String,
    /// Search term after the debounce quiet period
    pub debounced_term: String,
    /// `all_items` narrowed by `debounced_term`
    pub filtered: Vec<Product>,
    /// 1-based current page
    pub page: usize,
    /// Products per page
    pub page_size: usize,
    pub status: LoadStatus,
}

impl Default for CatalogState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl CatalogState {
    pub fn new(page_size: usize) -> Self {
        Self {
            all_items: Vec::new(),
            search_term: String::new(),
            debounced_term: String::new(),
            filtered: Vec::new(),
            page: 1,
            page_size: page_size.max(1),
            status: LoadStatus::Idle,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.status == LoadStatus::Loading
    }

    pub fn max_page(&self) -> usize {
        page_count(self.filtered.len(), self.page_size)
    }

    /// Products on the current page.
    pub fn visible_items(&self) -> &[Product] {
        page_window(&self.filtered, self.page, self.page_size)
    }

    pub fn paginator(&self) -> Paginator {
        Paginator::new(self.page, self.max_page())
    }

    fn refilter(&mut self) {
        self.filtered = filter_by_title(&self.all_items, &self.debounced_term);
    }
}

// ============================================================================
// Action Types
// ============================================================================

/// All possible actions on the listing
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogAction {
    /// A catalog fetch was issued
    LoadStarted,
    /// The catalog fetch returned these products
    Loaded(Vec<Product>),
    /// The catalog fetch failed
    LoadFailed(String),
    /// Raw search box input
    UpdateSearch(String),
    /// The debounced search term settled on a new value
    SearchSettled(String),
    /// Navigate to a page
    SetPage(usize),
}

// ============================================================================
// View Model
// ============================================================================

/// What to show instead of (or alongside) the product grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EmptyStateKind {
    /// Fetch in flight; show placeholder cards
    Loading,
    /// Fetch failed
    LoadFailed { message: String },
    /// The catalog itself is empty
    NoProducts,
    /// Nothing matches the search term
    NoSearchResults { query: String },
}

impl EmptyStateKind {
    /// Recovery offered with this state, if any.
    pub fn recovery(&self) -> Option<RecoveryAction> {
        match self {
            EmptyStateKind::LoadFailed { .. } => Some(RecoveryAction::Retry),
            EmptyStateKind::NoSearchResults { .. } => Some(RecoveryAction::ClearSearch),
            EmptyStateKind::Loading | EmptyStateKind::NoProducts => None,
        }
    }
}

/// Computed view model for rendering the listing
#[derive(Debug, Clone, Serialize)]
pub struct CatalogViewModel {
    /// Products on the current page
    pub items: Vec<Product>,
    pub page: usize,
    pub max_page: usize,
    /// Paginator controls, in display order
    pub controls: Vec<PageControl>,
    /// Search box contents
    pub search_term: String,
    pub loading: bool,
    /// Number of skeleton cards to draw while loading
    pub placeholder_count: usize,
    pub empty_state: Option<EmptyStateKind>,
    pub total_filtered: usize,
    pub total_all: usize,
}

// ============================================================================
// Pure Functions
// ============================================================================

/// Pure function: apply action to state (reducer pattern)
///
/// Side effects (the fetch itself, the debounce timer) live in
/// `CatalogStore`; this only performs the state transition and re-derives
/// `filtered` when its inputs change.
pub fn reduce_catalog_state(mut state: CatalogState, action: CatalogAction) -> CatalogState {
    match action {
        CatalogAction::LoadStarted => {
            state.status = LoadStatus::Loading;
        }
        CatalogAction::Loaded(products) => {
            state.all_items = products;
            state.refilter();
            state.page = 1;
            state.status = LoadStatus::Loaded;
        }
        CatalogAction::LoadFailed(message) => {
            // Keep whatever was loaded before
            state.status = LoadStatus::Failed(message);
        }
        CatalogAction::UpdateSearch(text) => {
            state.search_term = text;
        }
        CatalogAction::SearchSettled(term) => {
            if term != state.debounced_term {
                state.debounced_term = term;
                state.refilter();
                state.page = 1;
            }
        }
        CatalogAction::SetPage(page) => {
            let max_page = state.max_page();
            let clamped = page.clamp(1, max_page);
            if clamped != page {
                tracing::debug!(requested = page, max_page, "clamping out-of-range page");
            }
            state.page = clamped;
        }
    }
    state
}

/// Pure function: compute the empty state shown for the current state
pub fn compute_empty_state(state: &CatalogState) -> Option<EmptyStateKind> {
    match &state.status {
        // Nothing has been fetched yet, so there is nothing to report
        LoadStatus::Idle => return None,
        LoadStatus::Loading => return Some(EmptyStateKind::Loading),
        LoadStatus::Failed(message) => {
            return Some(EmptyStateKind::LoadFailed {
                message: message.clone(),
            });
        }
        LoadStatus::Loaded => {}
    }

    if state.all_items.is_empty() {
        Some(EmptyStateKind::NoProducts)
    } else if state.filtered.is_empty() {
        Some(EmptyStateKind::NoSearchResults {
            query: state.debounced_term.clone(),
        })
    } else {
        None
    }
}

/// Pure function: compute view model from state
pub fn compute_view_model(state: &CatalogState) -> CatalogViewModel {
    let loading = state.is_loading();

    CatalogViewModel {
        items: state.visible_items().to_vec(),
        page: state.page,
        max_page: state.max_page(),
        controls: state.paginator().controls(),
        search_term: state.search_term.clone(),
        loading,
        placeholder_count: if loading { state.page_size } else { 0 },
        empty_state: compute_empty_state(state),
        total_filtered: state.filtered.len(),
        total_all: state.all_items.len(),
    }
}

// ============================================================================
// Tests
// ============================================================================
