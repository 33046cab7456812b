//! Products service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::{
    clock::{self, Clock},
    domain::products::{
        data::NewProduct,
        errors::ProductsServiceError,
        models::{Product, ProductId},
        repository::KvProductsRepository,
    },
    storage::KeyValueStore,
};

#[derive(Debug, Default)]
struct Catalog {
    products: Vec<Product>,
    last_issued: Option<i64>,
}

/// Product list mirrored to a key-value store.
///
/// The list lives in memory in insertion order and every mutation rewrites the complete list in
/// storage before it becomes visible, so memory and storage never drift apart.
#[derive(Debug)]
pub struct ProductStore {
    repository: KvProductsRepository,
    clock: Arc<dyn Clock>,
    catalog: Mutex<Catalog>,
}

impl ProductStore {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            repository: KvProductsRepository::new(store),
            clock,
            catalog: Mutex::new(Catalog::default()),
        }
    }

    async fn hydrate(&self, catalog: &mut Catalog) -> Result<(), ProductsServiceError> {
        catalog.products = self.repository.load_products().await?;

        debug!(count = catalog.products.len(), "loaded products");

        Ok(())
    }

    /// An empty list may simply not have been loaded yet, and writing it back would wipe storage.
    async fn hydrate_if_empty(&self, catalog: &mut Catalog) -> Result<(), ProductsServiceError> {
        if catalog.products.is_empty() {
            self.hydrate(catalog).await?;
        }

        Ok(())
    }

    fn next_id(&self, catalog: &Catalog) -> ProductId {
        let last = catalog
            .products
            .iter()
            .map(|product| product.id.get())
            .chain(catalog.last_issued)
            .max();

        ProductId::new(clock::next_after(self.clock.now_millis(), last))
    }
}

#[async_trait]
impl ProductsService for ProductStore {
    async fn load(&self) -> Result<(), ProductsServiceError> {
        let mut catalog = self.catalog.lock().await;

        self.hydrate(&mut catalog).await
    }

    async fn list(&self) -> Result<Vec<Product>, ProductsServiceError> {
        let mut catalog = self.catalog.lock().await;

        self.hydrate_if_empty(&mut catalog).await?;

        Ok(catalog.products.clone())
    }

    async fn add(&self, product: NewProduct) -> Result<Product, ProductsServiceError> {
        let mut catalog = self.catalog.lock().await;

        self.hydrate_if_empty(&mut catalog).await?;

        let id = self.next_id(&catalog);

        let created = Product {
            id,
            title: product.title,
            description: product.description,
            price: product.price,
            photo: product.photo,
        };

        catalog.products.push(created.clone());

        if let Err(error) = self.repository.save_products(&catalog.products).await {
            catalog.products.pop();

            return Err(error);
        }

        catalog.last_issued = Some(id.get());

        info!(%id, title = %created.title, "added product");

        Ok(created)
    }

    async fn remove_by_id(&self, id: ProductId) -> Result<(), ProductsServiceError> {
        let mut catalog = self.catalog.lock().await;

        self.hydrate_if_empty(&mut catalog).await?;

        let remaining: Vec<Product> = catalog
            .products
            .iter()
            .filter(|product| product.id != id)
            .cloned()
            .collect();

        self.repository.save_products(&remaining).await?;

        if remaining.len() < catalog.products.len() {
            info!(%id, "removed product");
        }

        catalog.products = remaining;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Replace the in-memory list with the persisted one.
    async fn load(&self) -> Result<(), ProductsServiceError>;

    /// Retrieves all products, loading them first when none are in memory.
    async fn list(&self) -> Result<Vec<Product>, ProductsServiceError>;

    /// Appends a product with a fresh identifier and persists the list.
    async fn add(&self, product: NewProduct) -> Result<Product, ProductsServiceError>;

    /// Removes the product with the given identifier, if present, and persists the list.
    async fn remove_by_id(&self, id: ProductId) -> Result<(), ProductsServiceError>;
}
