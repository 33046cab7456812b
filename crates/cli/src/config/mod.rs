//! Catalog CLI configuration

use clap::Parser;

use crate::{
    commands::Command,
    config::{observability::LoggingConfig, storage::StorageConfig},
};

pub(crate) mod observability;
pub(crate) mod storage;

pub(crate) use observability::LogFormat;

/// Product catalog command-line configuration
#[derive(Debug, Parser)]
#[command(name = "catalog", about = "Product catalog", long_about = None)]
pub(crate) struct CatalogConfig {
    /// Where the catalog is stored.
    #[command(flatten)]
    pub storage: StorageConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    #[command(subcommand)]
    pub command: Command,
}

impl CatalogConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub(crate) fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }
}
