use sqlx::PgPool;

use dzskills_config::{CorsConfig, JwtConfig, RateLimitConfig, StorageConfig};
use dzskills_core::LocalFileStorage;
use dzskills_db::init_db_pool;

#[derive(Clone, Debug)]
pub struct AppState {
    pub db: PgPool,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
    pub rate_limit_config: RateLimitConfig,
    pub file_storage: LocalFileStorage,
}

impl AppState {
    /// State for a given pool with configuration read from the environment.
    pub fn from_env(db: PgPool) -> Self {
        let storage_config = StorageConfig::from_env();

        Self {
            db,
            jwt_config: JwtConfig::from_env(),
            cors_config: CorsConfig::from_env(),
            rate_limit_config: RateLimitConfig::from_env(),
            file_storage: LocalFileStorage::new(storage_config.upload_dir, storage_config.base_url),
        }
    }
}

pub async fn init_app_state() -> AppState {
    AppState::from_env(init_db_pool().await)
}
