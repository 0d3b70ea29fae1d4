mod browse;
mod config;
mod ls;
mod show;

pub use browse::{BrowseCommand, cmd_browse, parse_browse_input};
pub use config::{cmd_config_get, cmd_config_set, cmd_config_show};
pub use ls::{LsOptions, cmd_ls};
pub use show::cmd_show;

use std::path::Path;

use serde::Serialize;

use crate::cli::OutputOptions;
use crate::config::Config;
use crate::error::Result;
use crate::remote::Catalog;

/// Print a value as pretty JSON
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Output of a command in both machine and human form
pub struct CommandOutput {
    json: serde_json::Value,
    text: Option<String>,
}

impl CommandOutput {
    pub fn new(json: serde_json::Value) -> Self {
        Self { json, text: None }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn print(self, output: OutputOptions) -> Result<()> {
        match self.text {
            Some(text) if !output.json => {
                println!("{text}");
                Ok(())
            }
            _ => print_json(&self.json),
        }
    }
}

/// Load configuration and build the catalog backend for a command.
pub(crate) fn open_catalog(fixture: Option<&Path>) -> Result<(Config, Catalog)> {
    let config = Config::load()?;
    let catalog = Catalog::from_config(&config, fixture)?;
    Ok((config, catalog))
}
