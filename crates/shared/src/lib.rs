//! Shared types, errors, and configuration for Staffly.
//!
//! This crate provides common types used across all other crates:
//! - Role and status enums for users and employees
//! - Typed IDs for type-safe entity references
//! - Pagination types for list endpoints
//! - JWT claims and token service
//! - Application-wide error types
//! - Configuration management

pub mod auth;
pub mod config;
pub mod error;
pub mod jwt;
pub mod types;

pub use auth::Claims;
pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use jwt::{JwtConfig, JwtError, JwtService};
pub use types::{Role, Status};
