//! Products service errors.

use thiserror::Error;

use crate::storage::StorageError;

#[derive(Debug, Error)]
pub enum ProductsServiceError {
    #[error("storage error")]
    Storage(#[from] StorageError),

    #[error("failed to serialize products")]
    Serialize(#[from] serde_json::Error),
}
