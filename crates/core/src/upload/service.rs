//! Streamed upload storage on the local filesystem.
//!
//! Files stream to disk in whatever chunks the HTTP layer hands over; a
//! cumulative size check aborts the write and deletes the partial file the
//! moment the limit is crossed, so oversized uploads never settle on disk.

use opendal::{services, Operator};
use uuid::Uuid;

use super::error::UploadError;
use super::policy::UploadPolicy;

/// Storage service for ID-proof uploads.
#[derive(Debug, Clone)]
pub struct UploadStore {
    op: Operator,
    policy: UploadPolicy,
}

/// Record of a completed upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    /// Name the file was stored under (random token + extension).
    pub stored_name: String,
    /// Total size in bytes.
    pub size: u64,
}

impl UploadStore {
    /// Creates a store rooted at the given upload directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the filesystem operator cannot be initialized.
    pub fn new(root: &str, policy: UploadPolicy) -> Result<Self, UploadError> {
        let builder = services::Fs::default().root(root);
        let op = Operator::new(builder)?.finish();
        Ok(Self { op, policy })
    }

    /// Returns the acceptance policy.
    #[must_use]
    pub fn policy(&self) -> &UploadPolicy {
        &self.policy
    }

    /// Starts a streamed upload for one file.
    ///
    /// The content type is checked against the allow-list up front; the size
    /// limit is enforced chunk by chunk because the total is not trustworthy
    /// until the stream ends. The original filename is never consulted.
    ///
    /// # Errors
    ///
    /// Returns `UploadError::DisallowedType` or a storage error.
    pub async fn begin(&self, content_type: &str) -> Result<PartialUpload, UploadError> {
        let ext = self.policy.extension_for(content_type)?;
        let stored_name = format!("{}.{ext}", Uuid::new_v4().simple());
        let writer = self.op.writer(&stored_name).await?;

        Ok(PartialUpload {
            op: self.op.clone(),
            writer: Some(writer),
            stored_name,
            written: 0,
            max: self.policy.max_file_size,
        })
    }

    /// Deletes a stored file, ignoring files already gone.
    ///
    /// # Errors
    ///
    /// Returns a storage error on backend failure.
    pub async fn delete(&self, stored_name: &str) -> Result<(), UploadError> {
        self.op.delete(stored_name).await?;
        Ok(())
    }
}

/// An in-progress streamed upload.
pub struct PartialUpload {
    op: Operator,
    writer: Option<opendal::Writer>,
    stored_name: String,
    written: u64,
    max: u64,
}

impl PartialUpload {
    /// Appends one chunk, enforcing the cumulative size limit.
    ///
    /// # Errors
    ///
    /// Returns `UploadError::FileTooLarge` once the limit is crossed; the
    /// partial file is deleted before returning. Storage failures also
    /// discard the partial file.
    pub async fn write(&mut self, chunk: &[u8]) -> Result<(), UploadError> {
        let prospective = self.written + chunk.len() as u64;
        if prospective > self.max {
            self.discard().await;
            return Err(UploadError::FileTooLarge {
                size: prospective,
                max: self.max,
            });
        }

        let Some(writer) = self.writer.as_mut() else {
            // Already discarded; treat as an aborted stream.
            return Err(UploadError::FileTooLarge {
                size: prospective,
                max: self.max,
            });
        };

        if let Err(e) = writer.write(chunk.to_vec()).await {
            self.discard().await;
            return Err(UploadError::Storage(e));
        }

        self.written = prospective;
        Ok(())
    }

    /// Completes the upload and returns the stored file record.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the final flush fails.
    pub async fn finish(mut self) -> Result<StoredFile, UploadError> {
        if let Some(mut writer) = self.writer.take() {
            writer.close().await?;
        }
        Ok(StoredFile {
            stored_name: self.stored_name,
            size: self.written,
        })
    }

    /// Abandons the upload and removes whatever was written.
    pub async fn discard(&mut self) {
        if let Some(mut writer) = self.writer.take() {
            let _ = writer.close().await;
            let _ = self.op.delete(&self.stored_name).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIB: usize = 1024 * 1024;

    fn temp_store() -> (UploadStore, std::path::PathBuf) {
        let dir = std::env::temp_dir().join(format!("staffly-uploads-{}", Uuid::new_v4().simple()));
        std::fs::create_dir_all(&dir).unwrap();
        let store = UploadStore::new(dir.to_str().unwrap(), UploadPolicy::default()).unwrap();
        (store, dir)
    }

    async fn stream_upload(
        store: &UploadStore,
        content_type: &str,
        total: usize,
    ) -> Result<StoredFile, UploadError> {
        let mut upload = store.begin(content_type).await?;
        let chunk = vec![0u8; 64 * 1024];
        let mut remaining = total;
        while remaining > 0 {
            let take = remaining.min(chunk.len());
            upload.write(&chunk[..take]).await?;
            remaining -= take;
        }
        upload.finish().await
    }

    #[tokio::test]
    async fn test_accepts_four_mib_pdf() {
        let (store, dir) = temp_store();
        let stored = stream_upload(&store, "application/pdf", 4 * MIB)
            .await
            .unwrap();

        assert!(stored.stored_name.ends_with(".pdf"));
        assert_eq!(stored.size, (4 * MIB) as u64);

        let on_disk = std::fs::metadata(dir.join(&stored.stored_name)).unwrap();
        assert_eq!(on_disk.len(), (4 * MIB) as u64);

        std::fs::remove_dir_all(dir).unwrap();
    }

    #[tokio::test]
    async fn test_rejects_six_mib_file_and_deletes_partial() {
        let (store, dir) = temp_store();
        let result = stream_upload(&store, "application/pdf", 6 * MIB).await;

        assert!(matches!(result, Err(UploadError::FileTooLarge { .. })));

        // Nothing may remain in the upload directory.
        let leftovers: Vec<_> = std::fs::read_dir(&dir).unwrap().collect();
        assert!(leftovers.is_empty());

        std::fs::remove_dir_all(dir).unwrap();
    }

    #[tokio::test]
    async fn test_rejects_plain_text() {
        let (store, dir) = temp_store();
        let result = store.begin("text/plain").await;
        assert!(matches!(result, Err(UploadError::DisallowedType(_))));
        std::fs::remove_dir_all(dir).unwrap();
    }

    #[tokio::test]
    async fn test_stored_name_is_a_fresh_token() {
        let (store, dir) = temp_store();
        let first = stream_upload(&store, "image/png", 16).await.unwrap();
        let second = stream_upload(&store, "image/png", 16).await.unwrap();

        assert_ne!(first.stored_name, second.stored_name);
        assert!(first.stored_name.ends_with(".png"));

        std::fs::remove_dir_all(dir).unwrap();
    }
}
