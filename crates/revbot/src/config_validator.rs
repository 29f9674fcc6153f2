//! Validation utilities.

use std::fmt::Write;

use revbot_config::{Config, DatabaseDriver};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Errors on environment variables:\n{}", errors)]
    EnvVarsError { errors: String },
}

fn validate_env_vars(config: &Config) -> Result<(), ValidationError> {
    #[inline]
    fn _missing(error: &mut String, name: &str) {
        error.push('\n');
        write!(error, "  - Missing env. var.: {}", name).unwrap();
    }

    #[inline]
    fn _invalid(error: &mut String, name: &str) {
        error.push('\n');
        write!(error, "  - Invalid value for env. var.: {}", name).unwrap();
    }

    let mut error = String::new();

    if config.name.is_empty() {
        _missing(&mut error, "BOT_NAME");
    }

    // Check PG configuration
    if config.database.driver == DatabaseDriver::Postgres {
        if config.database.pg.url.is_empty() {
            _missing(&mut error, "BOT_DATABASE_PG_URL");
        }
        if config.database.pg.pool_size == 0 {
            _invalid(&mut error, "BOT_DATABASE_PG_POOL_SIZE");
        }
    }

    if error.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::EnvVarsError { errors: error })
    }
}

/// Validate configuration.
pub fn validate_configuration(config: &Config) -> Result<(), ValidationError> {
    validate_env_vars(config)
}
