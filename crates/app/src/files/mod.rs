//! Private application file area.

use std::{
    io::ErrorKind,
    path::{Component, Path, PathBuf},
};

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use mockall::automock;
use thiserror::Error;
use tokio::{fs, io::AsyncWriteExt};
use tracing::debug;

/// Private file area errors.
#[derive(Debug, Error)]
pub enum FilesError {
    /// The path is not a plain file name inside the data directory.
    #[error("invalid private file path: {0}")]
    InvalidPath(String),

    /// A file with this name already exists and was left untouched.
    #[error("private file already exists: {0}")]
    AlreadyExists(String),

    /// File content handed over for writing is not valid base64.
    #[error("file content is not valid base64")]
    InvalidContent(#[from] base64::DecodeError),

    /// Reading or writing the file failed.
    #[error("private file I/O failed")]
    Io(#[from] std::io::Error),
}

#[automock]
#[async_trait]
/// File storage scoped to the application's private data area.
///
/// Content crosses this boundary as base64 text; how it is laid out on disk is up to the
/// implementation.
pub trait PrivateFiles: Send + Sync {
    /// Write base64 `data` to a new file at `path`.
    ///
    /// Never replaces an existing file; that case fails with [`FilesError::AlreadyExists`].
    async fn write_file(&self, path: &str, data: &str) -> Result<(), FilesError>;

    /// Read the file at `path` back as base64.
    async fn read_file(&self, path: &str) -> Result<String, FilesError>;
}

/// Private files stored as raw bytes under a data directory.
#[derive(Debug, Clone)]
pub struct DataDirFiles {
    root: PathBuf,
}

impl DataDirFiles {
    /// Create a file area rooted at `root`. The directory is created on first write.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, path: &str) -> Result<PathBuf, FilesError> {
        let mut components = Path::new(path).components();

        match (components.next(), components.next()) {
            (Some(Component::Normal(name)), None) => Ok(self.root.join(name)),
            _ => Err(FilesError::InvalidPath(path.to_string())),
        }
    }
}

#[async_trait]
impl PrivateFiles for DataDirFiles {
    async fn write_file(&self, path: &str, data: &str) -> Result<(), FilesError> {
        let target = self.resolve(path)?;
        let bytes = BASE64.decode(data)?;

        fs::create_dir_all(&self.root).await?;

        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&target)
            .await
            .map_err(|source| match source.kind() {
                ErrorKind::AlreadyExists => FilesError::AlreadyExists(path.to_string()),
                _ => FilesError::Io(source),
            })?;

        file.write_all(&bytes).await?;
        file.flush().await?;

        debug!(path = %target.display(), bytes = bytes.len(), "wrote private file");

        Ok(())
    }

    async fn read_file(&self, path: &str) -> Result<String, FilesError> {
        let target = self.resolve(path)?;
        let bytes = fs::read(&target).await?;

        Ok(BASE64.encode(bytes))
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;
    use testresult::TestResult;

    use super::*;

    #[tokio::test]
    async fn written_file_holds_decoded_bytes() -> TestResult {
        let dir = tempdir()?;
        let files = DataDirFiles::new(dir.path().join("data"));

        files.write_file("1.jpeg", &BASE64.encode(b"\xFF\xD8jpeg")).await?;

        assert_eq!(std::fs::read(dir.path().join("data/1.jpeg"))?, b"\xFF\xD8jpeg");
        assert_eq!(files.read_file("1.jpeg").await?, BASE64.encode(b"\xFF\xD8jpeg"));

        Ok(())
    }

    #[tokio::test]
    async fn existing_file_is_never_replaced() -> TestResult {
        let dir = tempdir()?;
        let files = DataDirFiles::new(dir.path());

        files.write_file("1.jpeg", &BASE64.encode(b"first")).await?;
        let result = files.write_file("1.jpeg", &BASE64.encode(b"second")).await;

        assert!(
            matches!(&result, Err(FilesError::AlreadyExists(path)) if path == "1.jpeg"),
            "expected AlreadyExists, got {result:?}"
        );
        assert_eq!(std::fs::read(dir.path().join("1.jpeg"))?, b"first");

        Ok(())
    }

    #[tokio::test]
    async fn paths_outside_the_data_directory_are_rejected() -> TestResult {
        let dir = tempdir()?;
        let files = DataDirFiles::new(dir.path());

        for path in ["../escape.jpeg", "/etc/passwd", "nested/photo.jpeg", "", "."] {
            let result = files.read_file(path).await;

            assert!(
                matches!(result, Err(FilesError::InvalidPath(_))),
                "expected InvalidPath for {path:?}, got {result:?}"
            );
        }

        Ok(())
    }

    #[tokio::test]
    async fn invalid_base64_is_not_written() -> TestResult {
        let dir = tempdir()?;
        let files = DataDirFiles::new(dir.path());

        let result = files.write_file("bad.jpeg", "not base64!").await;

        assert!(
            matches!(result, Err(FilesError::InvalidContent(_))),
            "expected InvalidContent, got {result:?}"
        );
        assert!(!dir.path().join("bad.jpeg").exists(), "nothing should be written");

        Ok(())
    }

    #[tokio::test]
    async fn reading_a_missing_file_is_an_io_error() -> TestResult {
        let dir = tempdir()?;
        let files = DataDirFiles::new(dir.path());

        let result = files.read_file("missing.jpeg").await;

        assert!(
            matches!(result, Err(FilesError::Io(_))),
            "expected Io, got {result:?}"
        );

        Ok(())
    }
}
