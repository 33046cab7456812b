//! Product Catalog CLI

use std::process::ExitCode;

use tracing::error;

use crate::config::CatalogConfig;

mod commands;
mod config;
mod observability;
mod render;

#[tokio::main]
async fn main() -> ExitCode {
    let config = match CatalogConfig::load() {
        Ok(config) => config,
        Err(error) => error.exit(),
    };

    if let Err(error) = observability::init(&config.logging) {
        #[expect(
            clippy::print_stderr,
            reason = "logging failed to initialize, must use eprintln for the error"
        )]
        {
            eprintln!("Logging error: {error}");
        }

        return ExitCode::FAILURE;
    }

    if let Err(error) = commands::run(config).await {
        error!(%error, "command failed");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
