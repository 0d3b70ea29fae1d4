//! Product listing: fetched catalog, debounced title search and pagination.

pub mod filter;
pub mod model;
mod store;

pub use filter::{contains_case_insensitive, filter_by_title};
pub use model::{
    CatalogAction, CatalogState, CatalogViewModel, EmptyStateKind, LoadStatus,
    compute_empty_state, compute_view_model, reduce_catalog_state,
};
pub use store::CatalogStore;
