//! Core business logic for Staffly.
//!
//! This crate contains pure business logic with ZERO web or database
//! dependencies. All domain calculations and validation rules live here.
//!
//! # Modules
//!
//! - `payroll` - Salary breakup arithmetic and currency formatting
//! - `slip` - Salary-slip PDF rendering
//! - `policy` - Role-based capability checks
//! - `auth` - Password hashing
//! - `upload` - ID-proof upload validation and storage

pub mod auth;
pub mod payroll;
pub mod policy;
pub mod slip;
pub mod upload;
