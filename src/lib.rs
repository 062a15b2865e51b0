//! User Management API
//!
//! A small HTTP service for user accounts:
//! - Create, update, delete and list users
//! - Argon2-hashed passwords, never returned by any endpoint
//! - PostgreSQL or in-memory user storage
//! - Single-image uploads to a local directory

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use api::state::{AppState, UserServiceTrait};
use config::StorageBackend;
use infrastructure::{
    image::DiskImageStore,
    storage::{run_migrations, PostgresConfig},
    user::{Argon2Hasher, InMemoryUserRepository, PostgresUserRepository, UserService},
};
use sqlx::PgPool;
use tracing::info;

/// Everything the server needs at runtime, plus the resources to release on shutdown
pub struct AppContext {
    pub state: AppState,
    pg_pool: Option<PgPool>,
}

impl AppContext {
    /// Release held resources (the PostgreSQL pool, when one is open)
    pub async fn shutdown(self) {
        if let Some(pool) = self.pg_pool {
            info!("Closing PostgreSQL connection pool");
            pool.close().await;
        }
    }
}

/// Create the application context from configuration
///
/// Connects to PostgreSQL and applies pending migrations when that backend is selected,
/// and makes sure the upload directory exists.
pub async fn create_app_context(config: &AppConfig) -> anyhow::Result<AppContext> {
    info!("Storage backend: {:?}", config.storage.backend);

    let hasher = Arc::new(Argon2Hasher::new());

    let (user_service, pg_pool): (Arc<dyn UserServiceTrait>, Option<PgPool>) =
        match config.storage.backend {
            StorageBackend::Memory => {
                let repository = Arc::new(InMemoryUserRepository::new());
                (Arc::new(UserService::new(repository, hasher)), None)
            }
            StorageBackend::Postgres => {
                let pool = connect_postgres(config).await?;
                let repository = Arc::new(PostgresUserRepository::new(pool.clone()));
                (Arc::new(UserService::new(repository, hasher)), Some(pool))
            }
        };

    let image_store = DiskImageStore::new(&config.uploads.directory);
    image_store.ensure_directory().await?;
    info!(directory = %image_store.directory().display(), "Upload directory ready");

    Ok(AppContext {
        state: AppState::new(user_service, Arc::new(image_store)),
        pg_pool,
    })
}

/// Open the PostgreSQL pool described by the storage configuration
pub async fn connect_postgres(config: &AppConfig) -> anyhow::Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = postgres_config(config).connect().await?;
    info!("PostgreSQL connection established");

    if let Some(version) = run_migrations(&pool).await? {
        info!(version, "Database schema up to date");
    }

    Ok(pool)
}

fn postgres_config(config: &AppConfig) -> PostgresConfig {
    let storage = &config.storage;

    PostgresConfig::new(&storage.database_url)
        .with_max_connections(storage.max_connections)
        .with_min_connections(storage.min_connections)
        .with_connect_timeout(storage.connect_timeout_secs)
        .with_idle_timeout(storage.idle_timeout_secs)
}
