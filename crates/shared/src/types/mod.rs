//! Common types used across the application.

pub mod id;
pub mod pagination;
pub mod role;
pub mod status;

pub use id::UserId;
pub use pagination::{PageMeta, PageRequest, PageResponse};
pub use role::{Role, ADMIN_ROLES};
pub use status::Status;
