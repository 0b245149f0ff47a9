use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use self::aggregation::AggregationConfig;
use self::executor::ExecutorConfig;
use self::log::LogConfig;

pub mod aggregation;
pub mod executor;
pub mod log;

pub use aggregation::{GroupingKind, OrderingKind};
pub use executor::ExecutionKind;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub executor: ExecutorConfig,
    pub aggregation: AggregationConfig,
    pub log: LogConfig,
}

impl Config {
    /// Defaults overridden by `GLOSSA_*` environment variables
    pub fn new() -> Self {
        Config {
            executor: ExecutorConfig::new(),
            aggregation: AggregationConfig::new(),
            log: LogConfig::new(),
        }
    }

    /// Missing fields fall back to their defaults
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }
}
