use std::{io, path::PathBuf, sync::Arc};

use catalog_app::{camera::FileCamera, products::data::ProductDraft};
use clap::Args;
use rust_decimal::Decimal;
use tracing::info;

use crate::{commands::CommandError, config::storage::StorageConfig, render::write_catalog};

#[derive(Debug, Args)]
pub(crate) struct CreateArgs {
    /// Product title
    #[arg(long, default_value = "")]
    title: String,

    /// Product description
    #[arg(long, default_value = "")]
    description: String,

    /// Product price
    #[arg(long)]
    price: Option<Decimal>,

    /// Image file to capture as the product photo
    #[arg(long)]
    photo: Option<PathBuf>,
}

pub(crate) async fn run(
    args: CreateArgs,
    storage: &StorageConfig,
    out: &mut impl io::Write,
) -> Result<(), CommandError> {
    let mut draft = ProductDraft {
        title: args.title,
        description: args.description,
        price: args.price,
        photo: args.photo.as_ref().map(|path| path.display().to_string()),
    };

    // Check the form before taking the photo so a rejected draft leaves no file behind.
    draft
        .clone()
        .validate()
        .map_err(|error| CommandError::Catalog(error.into()))?;

    let mut camera = FileCamera::new(args.photo.unwrap_or_default());

    if let Some(gallery) = &storage.gallery_dir {
        camera = camera.with_gallery(gallery);
    }

    let app = super::open(&storage.data_dir, Arc::new(camera));

    draft.photo = Some(app.capture_photo().await?);

    let product = app.create_product(draft).await?;

    info!(id = %product.id, photo = %product.photo, "created product");

    write_catalog(out, &app.list_entries().await?, false)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use catalog_app::{
        AppContext, CatalogError, camera::UnavailableCamera, products::data::ProductField,
    };
    use tempfile::tempdir;
    use testresult::TestResult;

    use super::*;

    fn storage(root: &std::path::Path) -> StorageConfig {
        StorageConfig {
            data_dir: root.join("data"),
            gallery_dir: Some(root.join("gallery")),
        }
    }

    #[tokio::test]
    async fn create_captures_photo_and_stores_product() -> TestResult {
        let dir = tempdir()?;
        let photo = dir.path().join("lamp.jpeg");
        std::fs::write(&photo, b"jpeg")?;

        let mut out = Vec::new();

        run(
            CreateArgs {
                title: "Lamp".to_string(),
                description: String::new(),
                price: Some(Decimal::from(20)),
                photo: Some(photo),
            },
            &storage(dir.path()),
            &mut out,
        )
        .await?;

        let app = AppContext::from_data_dir(&dir.path().join("data"), Arc::new(UnavailableCamera));
        let entries = app.list_entries().await?;

        assert_eq!(entries.len(), 1);
        assert!(
            entries.iter().all(|e| e.product.price == Decimal::from(20)
                && e.photo_data_url == "data:image/jpeg;base64,anBlZw=="),
            "unexpected entries: {entries:?}"
        );
        assert!(dir.path().join("gallery/lamp.jpeg").exists(), "gallery copy expected");
        assert!(String::from_utf8(out)?.contains("Lamp"), "table should list the product");

        Ok(())
    }

    #[tokio::test]
    async fn invalid_form_is_rejected_before_capturing() -> TestResult {
        let dir = tempdir()?;
        let mut out = Vec::new();

        let result = run(
            CreateArgs {
                title: String::new(),
                description: String::new(),
                price: None,
                photo: None,
            },
            &storage(dir.path()),
            &mut out,
        )
        .await;

        assert!(
            matches!(
                &result,
                Err(CommandError::Catalog(CatalogError::Validation(error)))
                    if error.fields()
                        == [ProductField::Title, ProductField::Price, ProductField::Photo]
            ),
            "expected validation error, got {result:?}"
        );
        assert!(!dir.path().join("data").exists(), "nothing should be stored");

        Ok(())
    }
}
