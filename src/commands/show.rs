use std::path::Path;

use super::{CommandOutput, open_catalog};
use crate::cli::OutputOptions;
use crate::detail::{DetailLoader, DetailStatus};
use crate::display::format_product_detail;
use crate::error::{Result, StorefrontError};
use crate::types::ProductId;

/// Display one product
pub async fn cmd_show(id: ProductId, output: OutputOptions, fixture: Option<&Path>) -> Result<()> {
    let (_, catalog) = open_catalog(fixture)?;
    let mut loader = DetailLoader::new(catalog);
    loader.open(id).await;

    let view = loader.view();
    match &loader.state().status {
        DetailStatus::NotFound => {
            eprintln!("{}", format_product_detail(&view));
            Err(StorefrontError::ProductNotFound(id))
        }
        DetailStatus::Error(message) => {
            eprintln!("{}", format_product_detail(&view));
            Err(StorefrontError::ProductUnavailable {
                id,
                message: message.clone(),
            })
        }
        DetailStatus::Idle | DetailStatus::Loading | DetailStatus::Success(_) => {
            CommandOutput::new(serde_json::to_value(&view)?)
                .with_text(format_product_detail(&view))
                .print(output)
        }
    }
}
