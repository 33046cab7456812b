//! Products Repository

use std::sync::Arc;

use tracing::warn;

use crate::{
    domain::products::{errors::ProductsServiceError, models::Product},
    storage::{KeyValueStore, StorageError},
};

/// Storage key holding the serialized product list.
pub(crate) const PRODUCTS_KEY: &str = "products";

/// Persists the whole product list as one JSON array under [`PRODUCTS_KEY`].
#[derive(Clone)]
pub(crate) struct KvProductsRepository {
    store: Arc<dyn KeyValueStore>,
}

impl KvProductsRepository {
    #[must_use]
    pub(crate) fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// An unreadable list is treated as no list at all.
    pub(crate) async fn load_products(&self) -> Result<Vec<Product>, StorageError> {
        let Some(blob) = self.store.get(PRODUCTS_KEY).await? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str(&blob) {
            Ok(products) => Ok(products),
            Err(error) => {
                warn!(%error, key = PRODUCTS_KEY, "discarding unreadable product list");

                Ok(Vec::new())
            }
        }
    }

    pub(crate) async fn save_products(
        &self,
        products: &[Product],
    ) -> Result<(), ProductsServiceError> {
        let blob = serde_json::to_string(products)?;

        self.store.set(PRODUCTS_KEY, &blob).await?;

        Ok(())
    }
}

impl std::fmt::Debug for KvProductsRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KvProductsRepository")
            .field("key", &PRODUCTS_KEY)
            .finish_non_exhaustive()
    }
}
