//! CLI command implementations.

pub mod migrate;
pub mod pos;
pub mod seed;

use sqlx::PgPool;
use thiserror::Error;

use campus_coffee_api::config::{ApiConfig, ConfigError};
use campus_coffee_api::db;
use campus_coffee_api::services::PosError;
use campus_coffee_core::PosNameError;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Database connection error.
    #[error("Database connection error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migration failed.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// POS operation failed.
    #[error("POS error: {0}")]
    Pos(#[from] PosError),

    /// Seed file could not be read.
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Seed file is not valid YAML.
    #[error("Invalid seed file: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A seed entry has an invalid name.
    #[error("Invalid POS name in seed entry {index}: {source}")]
    InvalidSeedEntry {
        index: usize,
        #[source]
        source: PosNameError,
    },
}

/// Load configuration and connect to the POS database.
async fn connect() -> Result<PgPool, CommandError> {
    let config = ApiConfig::from_env()?;

    tracing::info!("Connecting to POS database...");
    Ok(db::create_pool(&config.database_url).await?)
}
