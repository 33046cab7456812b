//! Storage Config

use std::path::PathBuf;

use clap::Args;

/// Catalog storage locations.
#[derive(Debug, Args)]
pub(crate) struct StorageConfig {
    /// Private data directory holding the product list and photos
    #[arg(
        long,
        env = "CATALOG_DATA_DIR",
        default_value = "catalog-data",
        global = true
    )]
    pub data_dir: PathBuf,

    /// Public gallery directory receiving a copy of each captured photo
    #[arg(long, env = "CATALOG_GALLERY_DIR", global = true)]
    pub gallery_dir: Option<PathBuf>,
}
