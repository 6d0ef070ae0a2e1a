//! ID-proof upload validation and storage.

mod error;
mod policy;
mod service;

pub use error::UploadError;
pub use policy::UploadPolicy;
pub use service::{PartialUpload, StoredFile, UploadStore};
