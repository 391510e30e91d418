//! StorageConfig: where and under which key the table is persisted.

use crate::config::xdg;
use crate::error::ApiError;
use crate::store::persistence::DEFAULT_TABLE_KEY;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

fn default_key() -> String {
    DEFAULT_TABLE_KEY.to_string()
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// sled database directory; None means `$XDG_DATA_HOME/roster/store`
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Key the table payload is stored under
    #[serde(default = "default_key")]
    pub key: String,
}

impl StorageConfig {
    /// Resolve the database directory. An explicit `override_dir` (the
    /// `--data-dir` flag) wins over the configured path.
    pub fn resolve_path(&self, override_dir: Option<&Path>) -> Result<PathBuf, ApiError> {
        if let Some(dir) = override_dir {
            return Ok(dir.to_path_buf());
        }
        match &self.path {
            Some(path) if !path.as_os_str().is_empty() => Ok(path.clone()),
            _ => xdg::default_store_dir(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: None,
            key: default_key(),
        }
    }
}
