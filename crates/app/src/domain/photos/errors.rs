//! Photos service errors.

use thiserror::Error;

use crate::{camera::CameraError, files::FilesError};

#[derive(Debug, Error)]
pub enum PhotosServiceError {
    #[error("camera error")]
    Camera(#[from] CameraError),

    #[error("private file error")]
    Files(#[from] FilesError),
}
