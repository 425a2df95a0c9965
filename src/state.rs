use std::sync::Arc;

use sqlx::PgPool;

use crate::config::cors::CorsConfig;
use crate::config::database::init_db_pool;
use crate::config::gate::GateConfig;
use crate::config::jwt::JwtConfig;
use crate::config::storage::StorageConfig;
use crate::middleware::auth::AuthGate;
use crate::utils::file_storage::{FileStorage, LocalFileStorage};

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
    pub storage_config: StorageConfig,
    /// The request gate; shared read-only with the middleware layer.
    pub gate: Arc<AuthGate>,
    pub storage: Arc<dyn FileStorage>,
}

pub async fn init_app_state() -> AppState {
    let jwt_config = JwtConfig::from_env();
    let storage_config = StorageConfig::from_env();

    AppState {
        db: init_db_pool().await,
        gate: Arc::new(AuthGate::new(GateConfig::from_env(), jwt_config.clone())),
        storage: Arc::new(LocalFileStorage::new(
            storage_config.upload_dir.clone(),
            storage_config.base_url.clone(),
            storage_config.max_file_size,
        )),
        jwt_config,
        cors_config: CorsConfig::from_env(),
        storage_config,
    }
}
