//! Request-scoped image uploads and their data URI encoding.

use base64::{engine::general_purpose, Engine as _};

/// Returns true when a `Content-Type` header value announces a multipart form.
pub fn is_multipart(content_type: &str) -> bool {
    content_type.starts_with("multipart/form-data")
}

/// Returns true for declared media types in the `image/` family.
pub fn is_image(media_type: &str) -> bool {
    media_type.starts_with("image/")
}

/// Formats `bytes` as `data:<media_type>;base64,<payload>`.
pub fn data_uri(media_type: &str, bytes: &[u8]) -> String {
    format!(
        "data:{};base64,{}",
        media_type,
        general_purpose::STANDARD.encode(bytes)
    )
}

/// An uploaded image held in memory for the lifetime of one request.
#[derive(Debug, Clone)]
pub struct Upload {
    media_type: String,
    bytes: Vec<u8>,
}

impl Upload {
    /// Wraps `bytes` if `media_type` is an image type, otherwise returns `None`.
    pub fn new(media_type: impl Into<String>, bytes: Vec<u8>) -> Option<Self> {
        let media_type = media_type.into();
        is_image(&media_type).then_some(Self { media_type, bytes })
    }

    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn data_uri(&self) -> String {
        data_uri(&self.media_type, &self.bytes)
    }
}
