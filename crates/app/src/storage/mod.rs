//! Key-value storage.
//!
//! The catalog keeps its whole product list under a single key, so the store only needs to get
//! and set string values.

use async_trait::async_trait;
use mockall::automock;
use thiserror::Error;

mod json_file;
mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

/// Key-value storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("storage I/O failed")]
    Io(#[from] std::io::Error),

    /// The backing file does not hold a JSON object of string values.
    #[error("storage file is malformed")]
    Malformed(#[source] serde_json::Error),
}

#[automock]
#[async_trait]
/// String values addressed by key.
pub trait KeyValueStore: Send + Sync {
    /// Retrieve the value stored under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}
