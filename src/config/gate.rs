//! Public-path allow-list configuration for the request gate.
//!
//! Paths are matched by prefix: any sub-path under a public prefix is also
//! public. The list is fixed at startup and shared read-only across requests.

use std::env;

/// Route prefixes exempt from authentication.
///
/// Covers the health check, both documentation UIs, the OpenAPI schema, and
/// the authentication endpoints themselves.
pub const DEFAULT_PUBLIC_PATHS: &[&str] = &[
    "/api/auth",
    "/health",
    "/swagger-ui",
    "/scalar",
    "/api-docs",
];

#[derive(Clone, Debug)]
pub struct GateConfig {
    pub public_paths: Vec<String>,
}

impl GateConfig {
    /// Reads `PUBLIC_PATHS` (comma-separated prefixes) from the environment,
    /// falling back to [`DEFAULT_PUBLIC_PATHS`].
    pub fn from_env() -> Self {
        let public_paths = match env::var("PUBLIC_PATHS") {
            Ok(raw) => raw
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            Err(_) => Self::default().public_paths,
        };

        Self { public_paths }
    }
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            public_paths: DEFAULT_PUBLIC_PATHS.iter().map(|s| s.to_string()).collect(),
        }
    }
}
