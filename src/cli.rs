use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::types::ProductId;

#[derive(Parser)]
#[command(name = "storefront")]
#[command(about = "Browse a product catalog from the terminal")]
#[command(version)]
pub struct Cli {
    /// Serve products from a JSON fixture instead of the catalog API
    #[arg(long, global = true, value_name = "PATH")]
    pub fixture: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Shared output flags
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct OutputOptions {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List one page of products
    #[command(visible_alias = "l")]
    Ls {
        /// Only show products whose title contains this text (case-insensitive)
        #[arg(short, long)]
        search: Option<String>,

        /// Page to show (1-based, clamped to the available pages)
        #[arg(short, long, default_value_t = 1)]
        page: usize,

        #[command(flatten)]
        output: OutputOptions,
    },

    /// Show one product
    #[command(visible_alias = "s")]
    Show {
        /// Product ID
        id: ProductId,

        #[command(flatten)]
        output: OutputOptions,
    },

    /// Browse the catalog interactively (type to search, :help for commands)
    Browse,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show {
        #[command(flatten)]
        output: OutputOptions,
    },
    /// Set a configuration value
    Set {
        /// Configuration key (api.base_url, catalog.page_size, search.debounce_ms, remote_timeout)
        key: String,
        /// Value to set
        value: String,
        #[command(flatten)]
        output: OutputOptions,
    },
    /// Get a configuration value
    Get {
        /// Configuration key (api.base_url, catalog.page_size, search.debounce_ms, remote_timeout)
        key: String,
        #[command(flatten)]
        output: OutputOptions,
    },
}

impl Cli {
    /// Execute the command, dispatching to the appropriate handler.
    pub async fn run(self) -> crate::error::Result<()> {
        use crate::commands::{
            LsOptions, cmd_browse, cmd_config_get, cmd_config_set, cmd_config_show, cmd_ls,
            cmd_show,
        };

        let fixture = self.fixture.as_deref();

        match self.command {
            Commands::Ls {
                search,
                page,
                output,
            } => {
                let opts = LsOptions {
                    search,
                    page,
                    output,
                };
                cmd_ls(opts, fixture).await
            }
            Commands::Show { id, output } => cmd_show(id, output, fixture).await,
            Commands::Browse => cmd_browse(fixture).await,
            Commands::Config { action } => match action {
                ConfigAction::Show { output } => cmd_config_show(output),
                ConfigAction::Set { key, value, output } => cmd_config_set(&key, &value, output),
                ConfigAction::Get { key, output } => cmd_config_get(&key, output),
            },
        }
    }
}
