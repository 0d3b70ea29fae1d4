//! Terminal rendering for listing and detail view models.

use owo_colors::OwoColorize;

use crate::catalog::EmptyStateKind;
use crate::types::RecoveryAction;

pub mod detail;
pub mod listing;

pub use detail::format_product_detail;
pub use listing::{format_listing, format_paginator, format_product_table};

/// Command that triggers a recovery action in `browse`.
pub fn recovery_command(action: RecoveryAction) -> &'static str {
    match action {
        RecoveryAction::Retry => ":retry",
        RecoveryAction::ClearSearch => ":clear",
        RecoveryAction::BackToListing => ":back",
    }
}

/// Format a recovery action as a button-like hint, e.g. `[Retry] (:retry)`.
pub fn format_recovery_hint(action: RecoveryAction) -> String {
    format!(
        "{} {}",
        format!("[{}]", action.label()).cyan().bold(),
        format!("({})", recovery_command(action)).dimmed()
    )
}

/// Message for a listing empty state, with its recovery hint if any.
pub fn format_empty_state(kind: &EmptyStateKind) -> String {
    let message = match kind {
        EmptyStateKind::Loading => "Loading products...".dimmed().to_string(),
        EmptyStateKind::LoadFailed { message } => {
            format!("{} {}", "Could not load products:".red().bold(), message)
        }
        EmptyStateKind::NoProducts => "No Products Found".yellow().to_string(),
        EmptyStateKind::NoSearchResults { query } => {
            format!("{} matching \"{}\"", "No Products Found".yellow(), query)
        }
    };

    match kind.recovery() {
        Some(action) => format!("{message}\n{}", format_recovery_hint(action)),
        None => message,
    }
}
