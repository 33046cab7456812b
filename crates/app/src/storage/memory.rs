//! In-process key-value store.

use async_trait::async_trait;
use rustc_hash::FxHashMap;
use tokio::sync::RwLock;

use super::{KeyValueStore, StorageError};

/// Key-value store held entirely in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RwLock<FxHashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values
            .write()
            .await
            .insert(key.to_string(), value.to_string());

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[tokio::test]
    async fn get_missing_key_returns_none() -> TestResult {
        let store = MemoryStore::new();

        assert_eq!(store.get("products").await?, None);

        Ok(())
    }

    #[tokio::test]
    async fn set_replaces_previous_value() -> TestResult {
        let store = MemoryStore::new();

        store.set("products", "[]").await?;
        store.set("products", "[1]").await?;

        assert_eq!(store.get("products").await?.as_deref(), Some("[1]"));

        Ok(())
    }
}
