//! Error types for document rendering.

/// Error returned by [`render_document`](crate::render_document).
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The schema tree could not be serialized.
    #[error("failed to encode schema document: {0}")]
    Json(#[from] serde_json::Error),

    /// The serializer produced bytes that are not valid UTF-8.
    #[error("schema document is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}
