//! Upload error types.

use thiserror::Error;

/// Upload operation errors.
#[derive(Debug, Error)]
pub enum UploadError {
    /// Content type is not on the allow-list.
    #[error("content type not allowed: {0}")]
    DisallowedType(String),

    /// Cumulative upload size exceeded the configured maximum.
    /// The partial file has already been deleted when this is returned.
    #[error("file too large: {size} bytes exceeds maximum {max} bytes")]
    FileTooLarge {
        /// Bytes received so far.
        size: u64,
        /// Maximum allowed size.
        max: u64,
    },

    /// Storage backend failure.
    #[error("storage error: {0}")]
    Storage(#[from] opendal::Error),
}

impl UploadError {
    /// Short human-readable message suitable for a redirect query string.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::DisallowedType(_) => "File type not allowed".to_string(),
            Self::FileTooLarge { max, .. } => {
                format!("File exceeds the {} MiB limit", max / (1024 * 1024))
            }
            Self::Storage(_) => "Upload failed, please try again".to_string(),
        }
    }
}
