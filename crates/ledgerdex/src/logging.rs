//! Process-wide `tracing` subscriber setup.

use crate::config::LogConfig;
use thiserror::Error as ThisError;
use tracing_subscriber::EnvFilter;

///
/// LoggingError
///

#[derive(Debug, ThisError)]
pub enum LoggingError {
    #[error("invalid log filter '{filter}': {message}")]
    Filter { filter: String, message: String },

    #[error("failed to install subscriber: {0}")]
    Install(String),
}

/// Parse the configured filter directives.
pub fn env_filter(config: &LogConfig) -> Result<EnvFilter, LoggingError> {
    EnvFilter::try_new(&config.filter).map_err(|err| LoggingError::Filter {
        filter: config.filter.clone(),
        message: err.to_string(),
    })
}

/// Install a fmt subscriber filtered by `config`. Fails if a global
/// subscriber is already set.
pub fn init(config: &LogConfig) -> Result<(), LoggingError> {
    let filter = env_filter(config)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .map_err(|err| LoggingError::Install(err.to_string()))
}

///
/// TESTS
///
