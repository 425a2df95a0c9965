//! Shared utilities.
//!
//! - [`errors`]: application error type and HTTP rendering
//! - [`file_storage`]: file storage abstraction for uploads
//! - [`jwt`]: token creation and verification

pub mod errors;
pub mod file_storage;
pub mod jwt;
