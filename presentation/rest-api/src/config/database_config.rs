use std::env;
use std::sync::Arc;

use business::domain::unit_of_work::UnitOfWorkFactory;
use persistence::db::{DatabaseConfig, create_postgres_pool, run_migrations};
use persistence::memory::InMemoryDatabase;
use persistence::unit_of_work::PgUnitOfWorkFactory;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum StorageConfigError {
    #[error("config.unknown_storage_backend")]
    UnknownBackend(String),
    #[error("config.invalid_max_connections")]
    InvalidMaxConnections(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    Memory,
}

impl StorageBackend {
    fn parse(value: &str) -> Result<Self, StorageConfigError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "memory" | "in-memory" => Ok(Self::Memory),
            other => Err(StorageConfigError::UnknownBackend(other.to_string())),
        }
    }
}

/// Storage selection and connection settings
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub database_url: String,
    pub max_connections: u32,
    pub migrations_path: String,
}

impl StorageConfig {
    /// Load storage configuration from environment variables
    ///
    /// Environment variables:
    /// - STORAGE_BACKEND: "postgres" or "memory" (default: "postgres")
    /// - DATABASE_URL: PostgreSQL connection string; when unset it is built
    ///   from DB_HOST, DB_PORT, DB_USER, DB_PASSWORD and DB_NAME
    /// - DB_MAX_CONNECTIONS: pool size (default: 5)
    /// - MIGRATIONS_PATH: migrations directory
    ///   (default: "infrastructure/persistence/migrations")
    pub fn from_env() -> Result<Self, StorageConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, StorageConfigError> {
        let backend = match lookup("STORAGE_BACKEND") {
            Some(value) => StorageBackend::parse(&value)?,
            None => StorageBackend::Postgres,
        };

        let max_connections = match lookup("DB_MAX_CONNECTIONS") {
            Some(value) => value
                .parse::<u32>()
                .ok()
                .filter(|size| *size > 0)
                .ok_or(StorageConfigError::InvalidMaxConnections(value))?,
            None => 5,
        };

        let database_url = lookup("DATABASE_URL").unwrap_or_else(|| compose_database_url(&lookup));
        let migrations_path = lookup("MIGRATIONS_PATH")
            .unwrap_or_else(|| "infrastructure/persistence/migrations".to_string());

        Ok(Self {
            backend,
            database_url,
            max_connections,
            migrations_path,
        })
    }
}

fn compose_database_url(lookup: &impl Fn(&str) -> Option<String>) -> String {
    let host = lookup("DB_HOST").unwrap_or_else(|| "localhost".to_string());
    let default_port = if host == "localhost" { "54321" } else { "5432" };
    let port = lookup("DB_PORT").unwrap_or_else(|| default_port.to_string());
    let user = lookup("DB_USER").unwrap_or_else(|| "myuser".to_string());
    let password = lookup("DB_PASSWORD").unwrap_or_else(|| "abc123".to_string());
    let name = lookup("DB_NAME").unwrap_or_else(|| "grocery".to_string());

    format!("postgresql://{}:{}@{}:{}/{}", user, password, host, port, name)
}

/// Initialize the unit-of-work factory for the configured backend
///
/// For PostgreSQL this opens the pool and brings the schema up to date.
///
/// # Errors
/// Returns error if the connection or a migration fails
pub async fn init_storage(config: &StorageConfig) -> anyhow::Result<Arc<dyn UnitOfWorkFactory>> {
    match config.backend {
        StorageBackend::Memory => {
            tracing::warn!("using in-memory storage, data is lost on shutdown");
            Ok(Arc::new(InMemoryDatabase::new()))
        }
        StorageBackend::Postgres => {
            let db_config = DatabaseConfig::new(config.database_url.clone())
                .with_max_connections(config.max_connections);
            let pool = create_postgres_pool(&db_config).await?;
            run_migrations(&pool, &config.migrations_path).await?;
            Ok(Arc::new(PgUnitOfWorkFactory::new(pool)))
        }
    }
}
