use std::{io, path::Path, sync::Arc};

use catalog_app::{camera::UnavailableCamera, products::models::ProductId};
use clap::Args;

use crate::{commands::CommandError, render::write_catalog};

#[derive(Debug, Args)]
pub(crate) struct RemoveArgs {
    /// Identifier of the product to delete
    id: i64,
}

pub(crate) async fn run(
    args: RemoveArgs,
    data_dir: &Path,
    out: &mut impl io::Write,
) -> Result<(), CommandError> {
    let app = super::open(data_dir, Arc::new(UnavailableCamera));

    let remaining = app.remove_product(ProductId::new(args.id)).await?;

    write_catalog(out, &remaining, false)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use catalog_app::{AppContext, products::data::ProductDraft};
    use rust_decimal::Decimal;
    use tempfile::tempdir;
    use testresult::TestResult;

    use super::*;

    #[tokio::test]
    async fn remove_deletes_only_the_matching_product() -> TestResult {
        let dir = tempdir()?;
        let app = AppContext::from_data_dir(dir.path(), Arc::new(UnavailableCamera));

        let product = app
            .create_product(ProductDraft {
                title: "Lamp".to_string(),
                description: String::new(),
                price: Some(Decimal::from(20)),
                photo: Some("123.jpeg".to_string()),
            })
            .await?;

        let mut out = Vec::new();
        run(RemoveArgs { id: product.id.get() + 1 }, dir.path(), &mut out).await?;
        assert!(String::from_utf8(out)?.contains("Lamp"), "unknown id keeps the product");

        let mut out = Vec::new();
        run(RemoveArgs { id: product.id.get() }, dir.path(), &mut out).await?;
        assert_eq!(String::from_utf8(out)?, "no products\n");

        Ok(())
    }
}
