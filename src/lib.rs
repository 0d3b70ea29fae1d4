pub mod catalog;
pub mod cli;
pub mod commands;
pub mod config;
pub mod debounce;
pub mod detail;
pub mod display;
pub mod error;
pub mod events;
pub mod paginator;
pub mod remote;
pub mod types;

pub use catalog::{CatalogState, CatalogStore, CatalogViewModel, EmptyStateKind, LoadStatus};
pub use config::Config;
pub use debounce::Debouncer;
pub use detail::{DetailLoader, DetailState, DetailStatus, DetailViewModel};
pub use error::{Result, StorefrontError};
pub use events::{EventBus, StoreEvent};
pub use paginator::{PageControl, PageControlKind, Paginator};
pub use remote::{Catalog, CatalogSource, HttpCatalog, MemoryCatalog, ProductLookup};
pub use types::{Category, Product, ProductId, RecoveryAction};
