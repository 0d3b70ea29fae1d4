//! Single-product detail view.

mod loader;
pub mod model;

pub use loader::{DetailLoader, fetch_outcome};
pub use model::{
    DetailState, DetailStatus, DetailViewModel, FetchOutcome, FetchTicket,
    compute_detail_view_model,
};
