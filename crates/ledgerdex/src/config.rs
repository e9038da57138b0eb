//! Contract configuration loaded from TOML.
//!
//! ```toml
//! [log]
//! filter = "ledgerdex=debug,info"
//!
//! [mirror]
//! policy = "require_init"
//! track_payments = false
//! ```
//!
//! Every section and field is optional; absent values take their defaults.

use ledgerdex_core::db::mirror::MirrorPolicy;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error as ThisError;

/// Filter used when `[log] filter` is not set.
pub const DEFAULT_LOG_FILTER: &str = "info";

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

///
/// ContractConfig
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContractConfig {
    pub log: LogConfig,
    pub mirror: MirrorConfig,
}

impl ContractConfig {
    /// Read and parse a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), "loaded contract config");

        Ok(config)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }
}

///
/// LogConfig
/// `[log]`
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
    /// `tracing-subscriber` env-filter directives.
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

///
/// MirrorConfig
/// `[mirror]`
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct MirrorConfig {
    pub policy: MirrorPolicy,

    /// Append created payments to the payment mirror.
    pub track_payments: bool,
}

impl Default for MirrorConfig {
    fn default() -> Self {
        Self {
            policy: MirrorPolicy::default(),
            track_payments: true,
        }
    }
}

///
/// TESTS
///
