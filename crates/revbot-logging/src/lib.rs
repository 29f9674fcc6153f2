//! Log configuration.

use std::str::FromStr;

use revbot_config::Config;
use thiserror::Error;
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_error::ErrorLayer;
use tracing_log::LogTracer;
use tracing_subscriber::{layer::SubscriberExt, EnvFilter};
use tracing_tree::HierarchicalLayer;

const DEFAULT_ENV_CONFIG: &str = "info,sqlx=error,revbot=debug";

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Could not set tracing global default subscriber: {source}")]
    TracingSetGlobalDefaultError {
        source: tracing::dispatcher::SetGlobalDefaultError,
    },
    #[error("Could not initialize tracing log tracer: {source}")]
    TracingLogTracerError { source: tracing_log::log::SetLoggerError },
    #[error("Wrong env filter configuration '{configuration}': {source}")]
    EnvFilterConfigurationError {
        source: tracing_subscriber::filter::ParseError,
        configuration: String,
    },
}

fn build_env_filter(configuration: String) -> Result<EnvFilter, LoggingError> {
    EnvFilter::from_str(&configuration).map_err(|e| LoggingError::EnvFilterConfigurationError {
        source: e,
        configuration,
    })
}

/// Configure logging.
pub fn configure_logging(config: &Config) -> Result<(), LoggingError> {
    LogTracer::init().map_err(|e| LoggingError::TracingLogTracerError { source: e })?;

    let log_config = std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_ENV_CONFIG.to_string());
    let app_name = format!("{}-{}", config.name, config.version);

    let filter_layer = build_env_filter(log_config)?;
    let hierarchical_layer = HierarchicalLayer::new(2)
        .with_targets(true)
        .with_bracketed_fields(true);
    let error_layer = ErrorLayer::default();
    let (json_storage_layer, bunyan_layer) = if config.logging.use_bunyan {
        (
            Some(JsonStorageLayer),
            Some(BunyanFormattingLayer::new(app_name, std::io::stdout)),
        )
    } else {
        (None, None)
    };

    let subscriber = tracing_subscriber::registry()
        .with(error_layer)
        .with(hierarchical_layer)
        .with(filter_layer)
        .with(json_storage_layer)
        .with(bunyan_layer);

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| LoggingError::TracingSetGlobalDefaultError { source: e })?;

    Ok(())
}
