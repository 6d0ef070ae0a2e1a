//! Upload acceptance policy: content-type allow-list and size limit.

use super::error::UploadError;

/// Content types accepted for ID proofs, with the extension each one is
/// stored under. The original filename is discarded entirely.
const ALLOWED_TYPES: &[(&str, &str)] = &[
    ("image/png", "png"),
    ("image/jpeg", "jpg"),
    ("image/gif", "gif"),
    ("application/pdf", "pdf"),
];

/// Default maximum upload size: 5 MiB.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 5 * 1024 * 1024;

/// Acceptance policy for a single uploaded file.
#[derive(Debug, Clone)]
pub struct UploadPolicy {
    /// Maximum file size in bytes.
    pub max_file_size: u64,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }
}

impl UploadPolicy {
    /// Creates a policy with a custom size limit.
    #[must_use]
    pub const fn with_max_file_size(max_file_size: u64) -> Self {
        Self { max_file_size }
    }

    /// Returns the storage extension for an allowed content type.
    ///
    /// # Errors
    ///
    /// Returns `UploadError::DisallowedType` for anything off the allow-list.
    pub fn extension_for(&self, content_type: &str) -> Result<&'static str, UploadError> {
        ALLOWED_TYPES
            .iter()
            .find(|(ct, _)| *ct == content_type)
            .map(|(_, ext)| *ext)
            .ok_or_else(|| UploadError::DisallowedType(content_type.to_string()))
    }

    /// Whether a content type is on the allow-list.
    #[must_use]
    pub fn is_allowed(&self, content_type: &str) -> bool {
        self.extension_for(content_type).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("image/png", "png")]
    #[case("image/jpeg", "jpg")]
    #[case("image/gif", "gif")]
    #[case("application/pdf", "pdf")]
    fn test_allowed_types(#[case] content_type: &str, #[case] ext: &str) {
        let policy = UploadPolicy::default();
        assert_eq!(policy.extension_for(content_type).unwrap(), ext);
    }

    #[rstest]
    #[case("text/plain")]
    #[case("application/x-executable")]
    #[case("image/svg+xml")]
    #[case("")]
    fn test_disallowed_types(#[case] content_type: &str) {
        let policy = UploadPolicy::default();
        assert!(matches!(
            policy.extension_for(content_type),
            Err(UploadError::DisallowedType(_))
        ));
    }

    #[test]
    fn test_default_limit_is_five_mib() {
        assert_eq!(UploadPolicy::default().max_file_size, 5 * 1024 * 1024);
    }
}
