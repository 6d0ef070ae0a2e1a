//! `SeaORM` entity definitions.

pub mod audit_logs;
pub mod employees;
pub mod users;
