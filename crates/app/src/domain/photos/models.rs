//! Photo Models

use std::fmt::{Display, Formatter, Result as FmtResult};

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};

/// MIME type every stored photo is displayed as.
pub const PHOTO_MIME_TYPE: &str = "image/jpeg";

/// Extension given to stored photo files.
pub const PHOTO_EXTENSION: &str = "jpeg";

/// A self-contained `data:` URL embedding base64 image content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUrl {
    mime_type: String,
    data: String,
}

impl DataUrl {
    /// Encode raw bytes.
    #[must_use]
    pub fn encode(mime_type: &str, bytes: &[u8]) -> Self {
        Self::from_base64(mime_type, BASE64.encode(bytes))
    }

    /// Wrap content that is already base64.
    #[must_use]
    pub fn from_base64(mime_type: &str, data: String) -> Self {
        Self {
            mime_type: mime_type.to_string(),
            data,
        }
    }

    /// The MIME type.
    #[must_use]
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// The base64 content without the `data:` prefix.
    #[must_use]
    pub fn payload(&self) -> &str {
        &self.data
    }
}

impl Display for DataUrl {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "data:{};base64,{}", self.mime_type, self.data)
    }
}
