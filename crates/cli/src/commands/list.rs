use std::{io, path::Path, sync::Arc};

use catalog_app::camera::UnavailableCamera;
use clap::Args;

use crate::{commands::CommandError, render::write_catalog};

#[derive(Debug, Args)]
pub(crate) struct ListArgs {
    /// Print each photo as a full data URL instead of its size
    #[arg(long)]
    embed: bool,
}

pub(crate) async fn run(
    args: ListArgs,
    data_dir: &Path,
    out: &mut impl io::Write,
) -> Result<(), CommandError> {
    let app = super::open(data_dir, Arc::new(UnavailableCamera));
    let entries = app.list_entries().await?;

    write_catalog(out, &entries, args.embed)?;

    Ok(())
}
