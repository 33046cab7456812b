//! Photos service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use tokio::sync::Mutex;
use tracing::{debug, error, info};

use crate::{
    camera::{Camera, CameraOptions},
    clock::{self, Clock},
    domain::photos::{
        errors::PhotosServiceError,
        models::{DataUrl, PHOTO_EXTENSION, PHOTO_MIME_TYPE},
    },
    files::{FilesError, PrivateFiles},
};

/// Moves photos between the camera, the private file area and display.
pub struct PhotoMaterializer {
    camera: Arc<dyn Camera>,
    files: Arc<dyn PrivateFiles>,
    clock: Arc<dyn Clock>,
    last_stamp: Mutex<Option<i64>>,
}

impl PhotoMaterializer {
    #[must_use]
    pub fn new(
        camera: Arc<dyn Camera>,
        files: Arc<dyn PrivateFiles>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            camera,
            files,
            clock,
            last_stamp: Mutex::new(None),
        }
    }

    async fn next_filename(&self) -> String {
        let mut last = self.last_stamp.lock().await;
        let stamp = clock::next_after(self.clock.now_millis(), *last);

        *last = Some(stamp);

        format!("{stamp}.{PHOTO_EXTENSION}")
    }
}

impl std::fmt::Debug for PhotoMaterializer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhotoMaterializer")
            .field("clock", &self.clock)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl PhotosService for PhotoMaterializer {
    async fn capture(&self) -> Result<String, PhotosServiceError> {
        let photo = self.camera.get_photo(CameraOptions::default()).await?;
        let blob = self.camera.fetch(&photo).await?;

        let encoded = DataUrl::encode(&blob.mime_type, &blob.bytes);

        // Names already on disk may come from other materializers or an earlier clock reading.
        loop {
            let filename = self.next_filename().await;

            match self.files.write_file(&filename, encoded.payload()).await {
                Ok(()) => {
                    info!(
                        %filename,
                        mime_type = encoded.mime_type(),
                        bytes = blob.bytes.len(),
                        "stored captured photo"
                    );

                    return Ok(filename);
                }
                Err(FilesError::AlreadyExists(_)) => {
                    debug!(%filename, "photo name taken, trying the next one");
                }
                Err(error) => return Err(error.into()),
            }
        }
    }

    async fn resolve_to_displayable(&self, filename: &str) -> String {
        match self.files.read_file(filename).await {
            Ok(content) => DataUrl::from_base64(PHOTO_MIME_TYPE, content).to_string(),
            Err(source) => {
                error!(%filename, error = %source, "failed to read photo");

                String::new()
            }
        }
    }
}

#[automock]
#[async_trait]
pub trait PhotosService: Send + Sync {
    /// Takes a photo, stores it in the private file area and returns its file name.
    async fn capture(&self) -> Result<String, PhotosServiceError>;

    /// Reads a stored photo back as a `data:` URL, or an empty string when it cannot be read.
    async fn resolve_to_displayable(&self, filename: &str) -> String;
}
