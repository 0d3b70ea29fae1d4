use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{EnvFilter, prelude::*};

use storefront::cli::Cli;

/// Logs go to stderr so stdout stays machine-readable with `--json`.
fn init_tracing() {
    let filter = EnvFilter::try_from_env("STOREFRONT_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match cli.run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
