//! Catalog commands.

use std::{path::Path, sync::Arc};

use catalog_app::{AppContext, CatalogError, camera::Camera};
use clap::Subcommand;
use thiserror::Error;

use crate::config::CatalogConfig;

mod create;
mod list;
mod remove;

#[derive(Debug, Error)]
pub(crate) enum CommandError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("failed to write output")]
    Output(#[from] std::io::Error),
}

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Show every product with its photo
    List(list::ListArgs),

    /// Photograph an item and add it to the catalog
    Create(create::CreateArgs),

    /// Delete a product by id
    Remove(remove::RemoveArgs),
}

pub(crate) async fn run(config: CatalogConfig) -> Result<(), CommandError> {
    let storage = config.storage;
    let mut out = std::io::stdout().lock();

    match config.command {
        Command::List(args) => list::run(args, &storage.data_dir, &mut out).await,
        Command::Create(args) => create::run(args, &storage, &mut out).await,
        Command::Remove(args) => remove::run(args, &storage.data_dir, &mut out).await,
    }
}

fn open(data_dir: &Path, camera: Arc<dyn Camera>) -> AppContext {
    AppContext::from_data_dir(data_dir, camera)
}
