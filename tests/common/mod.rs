#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::response::Response;
use campusdesk::config::cors::CorsConfig;
use campusdesk::config::gate::GateConfig;
use campusdesk::config::jwt::JwtConfig;
use campusdesk::config::storage::StorageConfig;
use campusdesk::middleware::auth::AuthGate;
use campusdesk::state::AppState;
use campusdesk::utils::file_storage::LocalFileStorage;
use campusdesk::utils::jwt::create_access_token;
use http_body_util::BodyExt;
use sqlx::PgPool;

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test-secret-key-at-least-32-characters-long".to_string(),
        access_token_expiry: 3600,
    }
}

/// Mints a valid admin bearer token for the test secret.
pub fn admin_token() -> String {
    create_access_token(1, "ADMIN", vec!["admin:all".to_string()], &test_jwt_config()).unwrap()
}

/// Application state over a test database, with uploads going to a temp dir.
pub fn test_state(pool: PgPool) -> AppState {
    let jwt_config = test_jwt_config();
    let storage_config = StorageConfig {
        upload_dir: std::env::temp_dir().join("campusdesk-test-uploads"),
        base_url: "http://localhost:3000/files".to_string(),
        max_file_size: 10 * 1024 * 1024,
    };

    AppState {
        db: pool,
        gate: Arc::new(AuthGate::new(GateConfig::default(), jwt_config.clone())),
        storage: Arc::new(LocalFileStorage::new(
            storage_config.upload_dir.clone(),
            storage_config.base_url.clone(),
            storage_config.max_file_size,
        )),
        jwt_config,
        cors_config: CorsConfig {
            allowed_origins: vec!["http://localhost:5173".to_string()],
        },
        storage_config,
    }
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Builds a minimal multipart body with one file part and optional text parts.
pub fn multipart_body(
    boundary: &str,
    file_name: &str,
    content_type: &str,
    content: &[u8],
    text_parts: &[(&str, &str)],
) -> Vec<u8> {
    let mut body = Vec::new();

    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(content);
    body.extend_from_slice(b"\r\n");

    for (name, value) in text_parts {
        body.extend_from_slice(
            format!("--{boundary}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n")
                .as_bytes(),
        );
    }

    body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());
    body
}
