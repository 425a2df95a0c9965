//! The request authentication gate.
//!
//! Every inbound request passes through [`require_auth`] before any handler
//! runs. The gate classifies the request as public or protected, validates
//! the bearer token on protected routes, and attaches a [`CurrentUser`] to
//! the request extensions. Handlers read the identity through the
//! [`CurrentUser`] extractor, which fails with 401 if the gate never set it,
//! so downstream code cannot silently act on an absent identity.
//!
//! Decision order (first match wins):
//!
//! 1. `OPTIONS` requests pass — CORS preflight carries no credentials.
//! 2. Paths starting with an allow-listed prefix pass with no identity.
//! 3. Missing/malformed `Authorization` header → 401 "Authentication required".
//! 4. Token verification failure → 401 "Invalid or expired token".
//! 5. Claims empty or missing `sub` → 401 "Invalid token payload".
//! 6. Otherwise the identity is built and the request proceeds.
//!
//! Verification-primitive faults (bad key material, crypto backend errors)
//! are NOT auth failures: they surface as 500 so operators can tell a broken
//! auth subsystem apart from bad client credentials.

use std::sync::Arc;

use axum::{
    Json,
    extract::{FromRequestParts, Request, State},
    http::{Method, StatusCode, header, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::{Map, Value, json};
use tracing::{debug, error, warn};

use crate::config::gate::GateConfig;
use crate::config::jwt::JwtConfig;
use crate::utils::errors::AppError;
use crate::utils::jwt::{TokenError, decode_token};

pub const MSG_AUTH_REQUIRED: &str = "Authentication required";
pub const MSG_INVALID_TOKEN: &str = "Invalid or expired token";
pub const MSG_INVALID_PAYLOAD: &str = "Invalid token payload";

const BEARER_PREFIX: &str = "Bearer ";

/// The authenticated principal for one request.
///
/// Built by the gate from verified claims and dropped with the request.
/// Everything downstream trusts this without re-validating the token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: i64,
    pub role: String,
    pub permissions: Vec<String>,
}

impl CurrentUser {
    /// Check if the user carries a specific permission tag.
    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions.iter().any(|p| p == permission)
    }

    /// Builds the identity from a verified claims map.
    ///
    /// Returns `None` when the subject claim is missing or non-numeric; the
    /// gate maps that to the payload-invalid rejection. Defaults: `role` is
    /// `"USER"`, `permissions` is empty.
    fn from_claims(claims: &Map<String, Value>) -> Option<Self> {
        let id = match claims.get("sub")? {
            Value::String(s) => s.parse::<i64>().ok()?,
            Value::Number(n) => n.as_i64()?,
            _ => return None,
        };

        let role = claims
            .get("role")
            .and_then(Value::as_str)
            .unwrap_or("USER")
            .to_string();

        let permissions = claims
            .get("permissions")
            .and_then(Value::as_array)
            .map(|values| {
                values
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Some(Self {
            id,
            role,
            permissions,
        })
    }
}

/// Outcome of one gate evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// Public or preflight request; proceed with no identity.
    Allow,
    /// Valid credential; proceed with the attached identity.
    AllowAs(CurrentUser),
    /// Terminal 401 with one of the three fixed messages.
    Deny(&'static str),
}

/// The gate itself: the immutable public-prefix allow-list plus the JWT
/// verification config, injected at construction.
#[derive(Debug, Clone)]
pub struct AuthGate {
    public_paths: Vec<String>,
    jwt: JwtConfig,
}

impl AuthGate {
    pub fn new(config: GateConfig, jwt: JwtConfig) -> Self {
        Self {
            public_paths: config.public_paths,
            jwt,
        }
    }

    /// Prefix-based public classification.
    ///
    /// Deliberately literal: `/api/auth/refresh` is public because it starts
    /// with `/api/auth` — and so is `/api/authxyz`. An over-broad prefix
    /// silently disables authentication for everything beneath it, so the
    /// list must be curated, not this check loosened.
    pub fn is_public(&self, path: &str) -> bool {
        self.public_paths.iter().any(|p| path.starts_with(p))
    }

    /// Evaluates the ordered gate rules for one request.
    ///
    /// Pure apart from the signature check: no I/O, no shared mutable state,
    /// safe to call concurrently, idempotent for an unchanged request.
    /// `Err` is reserved for verification-primitive faults (5xx); every
    /// client-caused failure comes back as `Ok(Deny(..))`.
    pub fn evaluate(
        &self,
        method: &Method,
        path: &str,
        authorization: Option<&str>,
    ) -> Result<GateDecision, AppError> {
        if method == Method::OPTIONS {
            return Ok(GateDecision::Allow);
        }

        if self.is_public(path) {
            return Ok(GateDecision::Allow);
        }

        let Some(token) = authorization.and_then(|h| h.strip_prefix(BEARER_PREFIX)) else {
            return Ok(GateDecision::Deny(MSG_AUTH_REQUIRED));
        };

        let claims = match decode_token(token, &self.jwt) {
            Ok(claims) => claims,
            Err(err) => return Self::token_failure(err),
        };

        if claims.is_empty() || !claims.contains_key("sub") {
            return Ok(GateDecision::Deny(MSG_INVALID_PAYLOAD));
        }

        match CurrentUser::from_claims(&claims) {
            Some(user) => Ok(GateDecision::AllowAs(user)),
            None => Ok(GateDecision::Deny(MSG_INVALID_PAYLOAD)),
        }
    }

    /// Maps a decode failure to the gate outcome: rejected tokens are a
    /// client-facing 401, verification-primitive faults escalate to a 500.
    fn token_failure(err: TokenError) -> Result<GateDecision, AppError> {
        match err {
            TokenError::Rejected => Ok(GateDecision::Deny(MSG_INVALID_TOKEN)),
            TokenError::Fault(e) => Err(AppError::internal(anyhow::anyhow!(
                "Token verification unavailable: {}",
                e
            ))),
        }
    }
}

/// Axum middleware wrapping [`AuthGate::evaluate`].
///
/// Layered over the whole router via `middleware::from_fn_with_state` with an
/// `Arc<AuthGate>`, so it runs once per request before any handler.
pub async fn require_auth(
    State(gate): State<Arc<AuthGate>>,
    mut req: Request,
    next: Next,
) -> Response {
    let decision = {
        let authorization = req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok());

        gate.evaluate(req.method(), req.uri().path(), authorization)
    };

    match decision {
        Ok(GateDecision::Allow) => next.run(req).await,
        Ok(GateDecision::AllowAs(user)) => {
            debug!(user.id = %user.id, user.role = %user.role, "Request authenticated");
            req.extensions_mut().insert(user);
            next.run(req).await
        }
        Ok(GateDecision::Deny(message)) => {
            warn!(path = %req.uri().path(), detail = %message, "Request rejected by auth gate");
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "detail": message })),
            )
                .into_response()
        }
        Err(e) => {
            error!(path = %req.uri().path(), error = %e.error, "Auth gate fault");
            e.into_response()
        }
    }
}

/// Typed accessor for the identity the gate attached.
///
/// Rejects with 401 when no identity is present, which only happens if a
/// handler was mounted outside the gate layer or on a public route.
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or_else(|| AppError::unauthorized(anyhow::anyhow!(MSG_AUTH_REQUIRED)))
    }
}
