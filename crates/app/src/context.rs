//! App Context

use std::{path::Path, sync::Arc};

use thiserror::Error;
use tracing::debug;

use crate::{
    camera::Camera,
    clock::{Clock, SystemClock},
    files::DataDirFiles,
    photos::{PhotoMaterializer, PhotosService, PhotosServiceError},
    products::{
        ProductStore, ProductsService, ProductsServiceError,
        data::{ProductDraft, ValidationError},
        models::{Product, ProductId},
    },
    storage::JsonFileStore,
};

/// Name of the key-value file inside the data directory.
pub const PREFERENCES_FILE: &str = "preferences.json";

/// Name of the private photo directory inside the data directory.
pub const FILES_DIR: &str = "files";

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error(transparent)]
    Products(#[from] ProductsServiceError),

    #[error(transparent)]
    Photos(#[from] PhotosServiceError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// A product ready for display, with its photo resolved to a `data:` URL.
///
/// The resolved photo is never written back to storage.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    pub product: Product,

    /// Empty when the photo could not be read.
    pub photo_data_url: String,
}

#[derive(Clone)]
pub struct AppContext {
    pub products: Arc<dyn ProductsService>,
    pub photos: Arc<dyn PhotosService>,
}

impl AppContext {
    #[must_use]
    pub fn new(products: Arc<dyn ProductsService>, photos: Arc<dyn PhotosService>) -> Self {
        Self { products, photos }
    }

    /// Build application context persisting under `data_dir`.
    ///
    /// Products go to [`PREFERENCES_FILE`] and photos to [`FILES_DIR`], both inside `data_dir`.
    #[must_use]
    pub fn from_data_dir(data_dir: &Path, camera: Arc<dyn Camera>) -> Self {
        Self::with_clock(data_dir, camera, Arc::new(SystemClock))
    }

    /// Like [`AppContext::from_data_dir`] with an explicit clock.
    #[must_use]
    pub fn with_clock(data_dir: &Path, camera: Arc<dyn Camera>, clock: Arc<dyn Clock>) -> Self {
        debug!(data_dir = %data_dir.display(), "opening catalog");

        let store = Arc::new(JsonFileStore::new(data_dir.join(PREFERENCES_FILE)));
        let files = Arc::new(DataDirFiles::new(data_dir.join(FILES_DIR)));

        Self {
            products: Arc::new(ProductStore::new(store, clock.clone())),
            photos: Arc::new(PhotoMaterializer::new(camera, files, clock)),
        }
    }

    /// Reload products from storage and resolve each photo for display.
    ///
    /// # Errors
    ///
    /// Returns an error when products cannot be read from storage. Unreadable photos do not
    /// fail the listing.
    pub async fn list_entries(&self) -> Result<Vec<CatalogEntry>, CatalogError> {
        self.products.load().await?;

        self.resolve_entries().await
    }

    /// Take a photo for a product that is being created.
    ///
    /// # Errors
    ///
    /// Returns an error when the camera or the private file area fails.
    pub async fn capture_photo(&self) -> Result<String, CatalogError> {
        Ok(self.photos.capture().await?)
    }

    /// Validate a draft and add it to the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Validation`] naming every invalid field, or a storage error.
    pub async fn create_product(&self, draft: ProductDraft) -> Result<Product, CatalogError> {
        let product = draft.validate()?;

        Ok(self.products.add(product).await?)
    }

    /// Remove a product and return the remaining entries.
    ///
    /// # Errors
    ///
    /// Returns an error when the list cannot be persisted.
    pub async fn remove_product(&self, id: ProductId) -> Result<Vec<CatalogEntry>, CatalogError> {
        self.products.remove_by_id(id).await?;

        self.resolve_entries().await
    }

    async fn resolve_entries(&self) -> Result<Vec<CatalogEntry>, CatalogError> {
        let products = self.products.list().await?;
        let mut entries = Vec::with_capacity(products.len());

        for product in products {
            let photo_data_url = self.photos.resolve_to_displayable(&product.photo).await;

            entries.push(CatalogEntry {
                product,
                photo_data_url,
            });
        }

        Ok(entries)
    }
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext").finish_non_exhaustive()
    }
}
