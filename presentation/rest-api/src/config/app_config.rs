use super::{
    cors_config,
    database_config::{StorageConfig, StorageConfigError},
    server_config::ServerConfig,
};
use poem::middleware::Cors;

pub struct AppConfig {
    pub server: ServerConfig,
    pub cors: Cors,
    pub storage: StorageConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, StorageConfigError> {
        Ok(Self {
            server: ServerConfig::from_env(),
            cors: cors_config::init_cors(),
            storage: StorageConfig::from_env()?,
        })
    }
}
