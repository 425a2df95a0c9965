//! JWT encoding and decoding for the request gate.
//!
//! The gate decodes tokens into a raw claims map rather than a fixed struct
//! so it can distinguish "token the client should not have sent" (missing
//! `sub`, empty payload) from "token that failed verification" and report
//! each with its own message.
//!
//! Decode failures are split into two kinds: [`TokenError::Rejected`] covers
//! everything a client can cause (malformed, expired, bad signature) and maps
//! to a 401; [`TokenError::Fault`] covers key/crypto problems on our side and
//! must surface as a 500, never as an auth failure.

use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::jwt::JwtConfig;
use crate::utils::errors::AppError;

/// Claims embedded in access tokens issued for this API.
///
/// `role` and `permissions` are optional on the wire: older tokens omit them
/// and the gate substitutes its documented defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Principal ID (stringified integer, subject claim)
    pub sub: String,
    /// Role tag, e.g. "USER" or "ADMIN"
    pub role: String,
    /// Capability tags granted to the principal
    pub permissions: Vec<String>,
    /// Expiration timestamp (Unix)
    pub exp: usize,
    /// Issued-at timestamp (Unix)
    pub iat: usize,
}

/// Outcome of a failed token decode.
#[derive(Debug)]
pub enum TokenError {
    /// The token itself was rejected: malformed, expired, or bad signature.
    Rejected,
    /// The verification primitive itself failed (key/crypto problem).
    Fault(jsonwebtoken::errors::Error),
}

/// Creates a signed access token for the given principal.
pub fn create_access_token(
    user_id: i64,
    role: &str,
    permissions: Vec<String>,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    let now = Utc::now().timestamp() as usize;
    let exp = now + jwt_config.access_token_expiry as usize;

    let claims = Claims {
        sub: user_id.to_string(),
        role: role.to_string(),
        permissions,
        exp,
        iat: now,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to create token: {}", e)))
}

/// Verifies a token and returns its raw claims map.
///
/// The signature is validated, and expiry when the `exp` claim is present.
/// No claim is mandatory at this layer: the claims shape (presence of `sub`,
/// numeric subject) is deliberately NOT checked here; that is the gate's
/// responsibility and carries a different client-facing message.
pub fn decode_token(token: &str, jwt_config: &JwtConfig) -> Result<Map<String, Value>, TokenError> {
    // The default validation refuses tokens without `exp` outright, which
    // would turn a shape problem into a decode failure.
    let mut validation = Validation::default();
    validation.required_spec_claims.clear();

    decode::<Map<String, Value>>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(classify_decode_error)
}

/// Maps a jsonwebtoken error to the gate's two failure kinds.
///
/// Key-material and crypto-backend errors mean the auth subsystem is broken,
/// not that the client presented a bad credential.
fn classify_decode_error(err: jsonwebtoken::errors::Error) -> TokenError {
    match err.kind() {
        ErrorKind::InvalidEcdsaKey
        | ErrorKind::InvalidRsaKey(_)
        | ErrorKind::InvalidKeyFormat
        | ErrorKind::Crypto(_) => TokenError::Fault(err),
        _ => TokenError::Rejected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-key-at-least-32-characters-long".to_string(),
            access_token_expiry: 3600,
        }
    }

    #[test]
    fn test_create_and_decode_round_trip() {
        let config = test_config();
        let token =
            create_access_token(42, "ADMIN", vec!["colleges:write".to_string()], &config).unwrap();

        let claims = decode_token(&token, &config).unwrap();
        assert_eq!(claims.get("sub").and_then(Value::as_str), Some("42"));
        assert_eq!(claims.get("role").and_then(Value::as_str), Some("ADMIN"));
        assert_eq!(
            claims.get("permissions").and_then(Value::as_array).map(Vec::len),
            Some(1)
        );
    }

    #[test]
    fn test_decode_garbage_is_rejected() {
        let config = test_config();
        match decode_token("not-a-token", &config) {
            Err(TokenError::Rejected) => {}
            other => panic!("expected Rejected, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_wrong_secret_is_rejected() {
        let config = test_config();
        let token = create_access_token(7, "USER", vec![], &config).unwrap();

        let wrong = JwtConfig {
            secret: "different-secret-key-at-least-32-chars!!".to_string(),
            access_token_expiry: 3600,
        };

        match decode_token(&token, &wrong) {
            Err(TokenError::Rejected) => {}
            other => panic!("expected Rejected, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_expired_is_rejected() {
        let config = test_config();
        let now = Utc::now().timestamp() as usize;
        let claims = Claims {
            sub: "7".to_string(),
            role: "USER".to_string(),
            permissions: vec![],
            exp: now - 120,
            iat: now - 3600,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .unwrap();

        match decode_token(&token, &config) {
            Err(TokenError::Rejected) => {}
            other => panic!("expected Rejected, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_without_exp_succeeds() {
        let config = test_config();
        let mut raw = Map::new();
        raw.insert("sub".to_string(), Value::String("9".to_string()));
        let token = encode(
            &Header::default(),
            &raw,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .unwrap();

        let claims = decode_token(&token, &config).unwrap();
        assert_eq!(claims.get("sub").and_then(Value::as_str), Some("9"));
        assert!(claims.get("exp").is_none());
    }

    #[test]
    fn test_decode_empty_claims_succeeds() {
        // A validly-signed empty payload must come back as an empty map, not
        // a decode failure; the gate owns the shape policy.
        let config = test_config();
        let token = encode(
            &Header::default(),
            &Map::new(),
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .unwrap();

        let claims = decode_token(&token, &config).unwrap();
        assert!(claims.is_empty());
    }

    #[test]
    fn test_key_format_error_is_fault() {
        match classify_decode_error(ErrorKind::InvalidKeyFormat.into()) {
            TokenError::Fault(_) => {}
            other => panic!("expected Fault, got {:?}", other),
        }
    }

    #[test]
    fn test_expired_signature_error_is_rejected() {
        match classify_decode_error(ErrorKind::ExpiredSignature.into()) {
            TokenError::Rejected => {}
            other => panic!("expected Rejected, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_preserves_extra_claims() {
        // Tokens minted elsewhere may carry claims we do not model; the raw
        // map must keep them so the gate can shape-check independently.
        let config = test_config();
        let now = Utc::now().timestamp() as usize;
        let mut raw = Map::new();
        raw.insert("sub".to_string(), Value::String("9".to_string()));
        raw.insert("exp".to_string(), Value::from(now + 600));
        raw.insert("tenant".to_string(), Value::String("acme".to_string()));
        let token = encode(
            &Header::default(),
            &raw,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .unwrap();

        let claims = decode_token(&token, &config).unwrap();
        assert_eq!(claims.get("tenant").and_then(Value::as_str), Some("acme"));
        assert!(claims.get("role").is_none());
    }
}
