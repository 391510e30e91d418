//! Configuration
//!
//! Layered configuration for the record table: built-in defaults, then the
//! global config file, then `ROSTER__*` environment variables.

mod facade;
pub mod merge;
pub mod paths;
pub mod sources;
mod storage;

pub use facade::ConfigLoader;
pub use paths::xdg_root as xdg;
pub use storage::StorageConfig;

use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RosterConfig {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub filters: FilterDefaults,

    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_statuses() -> Vec<String> {
    vec!["Active".to_string(), "Closed".to_string()]
}

fn default_companies() -> Vec<String> {
    vec![
        "DC United".to_string(),
        "Manchester United".to_string(),
        "LA Galaxy".to_string(),
    ]
}

/// Choices always offered by the status and company filter widgets
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterDefaults {
    #[serde(default = "default_statuses")]
    pub statuses: Vec<String>,

    #[serde(default = "default_companies")]
    pub companies: Vec<String>,
}

impl Default for FilterDefaults {
    fn default() -> Self {
        Self {
            statuses: default_statuses(),
            companies: default_companies(),
        }
    }
}
