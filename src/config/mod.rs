//! Configuration modules for the Campusdesk API.
//!
//! Each submodule handles one aspect of configuration, loaded from
//! environment variables with sensible development defaults.
//!
//! # Modules
//!
//! - [`cors`]: CORS allowed-origin configuration
//! - [`database`]: PostgreSQL connection pool initialization
//! - [`gate`]: Public-path allow-list for the request gate
//! - [`jwt`]: JWT secret and expiry configuration
//! - [`storage`]: Local file storage for course uploads

pub mod cors;
pub mod database;
pub mod gate;
pub mod jwt;
pub mod storage;
