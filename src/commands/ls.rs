use std::path::Path;

use super::{CommandOutput, open_catalog};
use crate::catalog::CatalogStore;
use crate::cli::OutputOptions;
use crate::display::{format_empty_state, format_listing};
use crate::error::Result;

/// Options for the ls command
#[derive(Debug, Clone, Default)]
pub struct LsOptions {
    /// Title filter, applied immediately (no debounce)
    pub search: Option<String>,
    /// 1-based page; out-of-range values are clamped
    pub page: usize,
    pub output: OutputOptions,
}

/// List one page of the catalog
pub async fn cmd_ls(opts: LsOptions, fixture: Option<&Path>) -> Result<()> {
    let (config, catalog) = open_catalog(fixture)?;
    let mut store = CatalogStore::from_config(catalog, &config);

    if let Err(e) = store.load().await {
        if let Some(kind) = store.view().empty_state {
            eprintln!("{}", format_empty_state(&kind));
        }
        return Err(e);
    }

    if let Some(term) = opts.search {
        store.set_search_term(term.clone());
        store.apply_search(term);
    }
    store.set_page(opts.page);

    let view = store.view();
    let json = serde_json::to_value(&view)?;

    CommandOutput::new(json)
        .with_text(format_listing(&view))
        .print(opts.output)
}
