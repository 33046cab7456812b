//! Key-value store persisted as one JSON object on disk.

use std::{
    collections::BTreeMap,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use tokio::{fs, sync::Mutex};
use tracing::debug;

use super::{KeyValueStore, StorageError};

type Values = BTreeMap<String, String>;

/// Key-value store backed by a single JSON file.
///
/// Every write rewrites the whole file through a sibling temporary file followed by a rename, so
/// readers never observe a half-written document.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    /// Create a store persisting to `path`. The file is created on first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Location of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_values(&self) -> Result<Values, StorageError> {
        let contents = match fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(Values::new()),
            Err(error) => return Err(error.into()),
        };

        serde_json::from_str(&contents).map_err(StorageError::Malformed)
    }

    async fn write_values(&self, values: &Values) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let contents = serde_json::to_vec_pretty(values).map_err(StorageError::Malformed)?;
        let staging = self.path.with_extension("json.tmp");

        fs::write(&staging, contents).await?;
        fs::rename(&staging, &self.path).await?;

        debug!(path = %self.path.display(), keys = values.len(), "wrote key-value file");

        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for JsonFileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_values().await?.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;

        let mut values = self.read_values().await?;
        values.insert(key.to_string(), value.to_string());

        self.write_values(&values).await
    }
}
