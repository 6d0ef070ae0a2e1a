//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod audit;
pub mod employee;
pub mod user;

pub use audit::{AuditContext, AuditLogRepository};
pub use employee::{
    CreateEmployeeInput, EmployeeError, EmployeeRepository, EmployeeWithUser, UpdateEmployeeInput,
};
pub use user::{UserError, UserRepository};
