//! Test helpers.

use crate::camera::{CapturedPhoto, MockCamera, PhotoBlob};

/// A camera that always returns `bytes` as `mime_type`.
pub(crate) fn camera_returning(mime_type: &'static str, bytes: &'static [u8]) -> MockCamera {
    let mut camera = MockCamera::new();

    camera.expect_get_photo().returning(|_| {
        Ok(CapturedPhoto {
            web_path: "capture.jpeg".to_string(),
        })
    });
    camera.expect_fetch().returning(move |_| {
        Ok(PhotoBlob {
            mime_type: mime_type.to_string(),
            bytes: bytes.to_vec(),
        })
    });

    camera
}
