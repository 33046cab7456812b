//! Camera capture.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use mockall::automock;
use thiserror::Error;
use tokio::fs;
use tracing::debug;

/// Camera errors.
#[derive(Debug, Error)]
pub enum CameraError {
    /// The camera cannot take pictures from the requested source.
    #[error("camera source {0:?} is not supported")]
    UnsupportedSource(CameraSource),

    /// No camera is attached.
    #[error("no camera available")]
    Unavailable,

    /// Reading the captured image failed.
    #[error("camera I/O failed")]
    Io(#[from] std::io::Error),
}

/// Where a photo is taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraSource {
    /// The device camera.
    Camera,

    /// The device photo library.
    Photos,

    /// Ask the user.
    Prompt,
}

/// Capture options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CameraOptions {
    /// Image quality, 0-100.
    pub quality: u8,

    /// Where to take the photo from.
    pub source: CameraSource,

    /// Also keep a copy in the device's public gallery.
    pub save_to_gallery: bool,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            quality: 90,
            source: CameraSource::Camera,
            save_to_gallery: true,
        }
    }
}

/// A photo handed back by the camera, addressed by a fetchable path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedPhoto {
    /// Path or `file://` URI the image can be fetched from.
    pub web_path: String,
}

/// Fetched photo content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoBlob {
    /// MIME type of `bytes`.
    pub mime_type: String,

    /// Encoded image bytes.
    pub bytes: Vec<u8>,
}

#[automock]
#[async_trait]
/// Device camera.
pub trait Camera: Send + Sync {
    /// Take a photo.
    async fn get_photo(&self, options: CameraOptions) -> Result<CapturedPhoto, CameraError>;

    /// Fetch the content of a previously captured photo.
    async fn fetch(&self, photo: &CapturedPhoto) -> Result<PhotoBlob, CameraError>;
}

/// A camera that "captures" an image file already on disk.
#[derive(Debug, Clone)]
pub struct FileCamera {
    source: PathBuf,
    gallery: Option<PathBuf>,
}

impl FileCamera {
    /// Capture the image at `source`.
    #[must_use]
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            gallery: None,
        }
    }

    /// Copy captured images into `gallery` when asked to save to the gallery.
    #[must_use]
    pub fn with_gallery(mut self, gallery: impl Into<PathBuf>) -> Self {
        self.gallery = Some(gallery.into());
        self
    }

    async fn save_to_gallery(&self, gallery: &Path) -> Result<(), CameraError> {
        let Some(name) = self.source.file_name() else {
            return Ok(());
        };

        fs::create_dir_all(gallery).await?;
        fs::copy(&self.source, gallery.join(name)).await?;

        debug!(gallery = %gallery.display(), "saved photo to gallery");

        Ok(())
    }
}

#[async_trait]
impl Camera for FileCamera {
    async fn get_photo(&self, options: CameraOptions) -> Result<CapturedPhoto, CameraError> {
        if options.source == CameraSource::Prompt {
            return Err(CameraError::UnsupportedSource(options.source));
        }

        fs::metadata(&self.source).await?;

        if options.save_to_gallery
            && let Some(gallery) = &self.gallery
        {
            self.save_to_gallery(gallery).await?;
        }

        debug!(
            source = %self.source.display(),
            quality = options.quality,
            "captured photo"
        );

        Ok(CapturedPhoto {
            web_path: self.source.display().to_string(),
        })
    }

    async fn fetch(&self, photo: &CapturedPhoto) -> Result<PhotoBlob, CameraError> {
        let path = Path::new(
            photo
                .web_path
                .strip_prefix("file://")
                .unwrap_or(&photo.web_path),
        );

        Ok(PhotoBlob {
            mime_type: mime_type_for(path).to_string(),
            bytes: fs::read(path).await?,
        })
    }
}

/// Stand-in for hosts without a camera; every capture fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableCamera;

#[async_trait]
impl Camera for UnavailableCamera {
    async fn get_photo(&self, _options: CameraOptions) -> Result<CapturedPhoto, CameraError> {
        Err(CameraError::Unavailable)
    }

    async fn fetch(&self, _photo: &CapturedPhoto) -> Result<PhotoBlob, CameraError> {
        Err(CameraError::Unavailable)
    }
}

fn mime_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|extension| extension.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        Some("heic") => "image/heic",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn default_options_match_catalog_capture() {
        let options = CameraOptions::default();

        assert_eq!(options.quality, 90);
        assert_eq!(options.source, CameraSource::Camera);
        assert!(options.save_to_gallery);
    }

    #[test]
    fn mime_type_follows_extension() {
        assert_eq!(mime_type_for(Path::new("a.JPG")), "image/jpeg");
        assert_eq!(mime_type_for(Path::new("a.png")), "image/png");
        assert_eq!(mime_type_for(Path::new("a")), "application/octet-stream");
    }

    #[tokio::test]
    async fn capture_copies_into_gallery_and_fetches_bytes() -> TestResult {
        let dir = tempdir()?;
        let source = dir.path().join("shot.jpeg");
        std::fs::write(&source, b"jpeg-bytes")?;

        let camera = FileCamera::new(&source).with_gallery(dir.path().join("gallery"));

        let photo = camera.get_photo(CameraOptions::default()).await?;
        let blob = camera.fetch(&photo).await?;

        assert_eq!(blob.mime_type, "image/jpeg");
        assert_eq!(blob.bytes, b"jpeg-bytes");
        assert_eq!(std::fs::read(dir.path().join("gallery/shot.jpeg"))?, b"jpeg-bytes");

        Ok(())
    }

    #[tokio::test]
    async fn gallery_is_skipped_when_not_requested() -> TestResult {
        let dir = tempdir()?;
        let source = dir.path().join("shot.png");
        std::fs::write(&source, b"png")?;

        let camera = FileCamera::new(&source).with_gallery(dir.path().join("gallery"));

        camera
            .get_photo(CameraOptions {
                save_to_gallery: false,
                ..CameraOptions::default()
            })
            .await?;

        assert!(!dir.path().join("gallery").exists(), "gallery should be untouched");

        Ok(())
    }

    #[tokio::test]
    async fn missing_source_file_fails_capture() -> TestResult {
        let dir = tempdir()?;
        let camera = FileCamera::new(dir.path().join("missing.jpeg"));

        let result = camera.get_photo(CameraOptions::default()).await;

        assert!(
            matches!(result, Err(CameraError::Io(_))),
            "expected Io, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn unavailable_camera_never_captures() {
        let result = UnavailableCamera.get_photo(CameraOptions::default()).await;

        assert!(
            matches!(result, Err(CameraError::Unavailable)),
            "expected Unavailable, got {result:?}"
        );
    }

    #[tokio::test]
    async fn prompt_source_is_unsupported() -> TestResult {
        let dir = tempdir()?;
        let source = dir.path().join("shot.jpeg");
        std::fs::write(&source, b"jpeg")?;

        let result = FileCamera::new(&source)
            .get_photo(CameraOptions {
                source: CameraSource::Prompt,
                ..CameraOptions::default()
            })
            .await;

        assert!(
            matches!(
                result,
                Err(CameraError::UnsupportedSource(CameraSource::Prompt))
            ),
            "expected UnsupportedSource, got {result:?}"
        );

        Ok(())
    }
}
