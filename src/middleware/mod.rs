//! Middleware for request processing.
//!
//! # Modules
//!
//! - [`auth`]: the request authentication gate and the [`auth::CurrentUser`]
//!   identity extractor
//!
//! # Authentication Flow
//!
//! 1. Client sends a request with an `Authorization: Bearer <token>` header
//! 2. The gate ([`auth::require_auth`]) classifies the route, verifies the
//!    token, and attaches a [`auth::CurrentUser`] to the request
//! 3. Handlers receive the identity through the `CurrentUser` extractor
//!
//! Public routes (health check, documentation, auth endpoints) bypass the
//! gate by path prefix and never carry an identity.

pub mod auth;
