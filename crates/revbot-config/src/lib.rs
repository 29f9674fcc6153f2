//! Config module.

mod drivers;

use std::{env, str::FromStr};

pub use drivers::{DatabaseDriver, DriverError};
use thiserror::Error;

/// Configuration error.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for env. var. {name}: {source}")]
    InvalidDriver { name: String, source: DriverError },
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Database driver.
    pub driver: DatabaseDriver,
    /// Postgres options.
    pub pg: DatabasePgConfig,
}

#[derive(Debug, Clone)]
pub struct DatabasePgConfig {
    /// Database URL.
    pub url: String,
    /// Database pool size.
    pub pool_size: u32,
    /// Database connection timeout (in seconds)
    pub connection_timeout: u32,
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Use bunyan logging.
    pub use_bunyan: bool,
}

/// Bot configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Bot name.
    pub name: String,
    /// Database options.
    pub database: DatabaseConfig,
    /// Logging options.
    pub logging: LoggingConfig,
    /// App version
    pub version: String,
}

impl Config {
    /// Create configuration from environment.
    pub fn from_env(version: String) -> Result<Config, ConfigError> {
        Ok(Config {
            name: env_to_str("BOT_NAME", "revbot"),
            database: DatabaseConfig {
                driver: env_to_driver("BOT_DATABASE_DRIVER", "pg")?,
                pg: DatabasePgConfig {
                    url: env_to_str("BOT_DATABASE_PG_URL", ""),
                    pool_size: env_to_u32("BOT_DATABASE_PG_POOL_SIZE", 20),
                    connection_timeout: env_to_u32("BOT_DATABASE_PG_CONNECTION_TIMEOUT", 5),
                },
            },
            logging: LoggingConfig {
                use_bunyan: env_to_bool("BOT_LOGGING_USE_BUNYAN", false),
            },
            version,
        })
    }

    pub fn from_env_no_version() -> Result<Config, ConfigError> {
        Self::from_env("0.0.0".into())
    }
}

fn env_to_driver(name: &str, default: &str) -> Result<DatabaseDriver, ConfigError> {
    DatabaseDriver::from_str(&env_to_str(name, default)).map_err(|e| ConfigError::InvalidDriver {
        name: name.into(),
        source: e,
    })
}

fn env_to_u32(name: &str, default: u32) -> u32 {
    env::var(name)
        .map(|e| e.parse().unwrap_or(default))
        .unwrap_or(default)
}

fn env_to_bool(name: &str, default: bool) -> bool {
    env::var(name).map(|e| !e.is_empty()).unwrap_or(default)
}

fn env_to_str(name: &str, default: &str) -> String {
    env::var(name)
        .unwrap_or_else(|_e| default.to_string())
        .replace("\\n", "\n")
}
