//! Configuration for the upload boundary.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::wc::TieOrder;

/// Default upload limit: 10 MiB.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Largest accepted upload body, in bytes.
    /// Default: 10 MiB.
    pub max_upload_bytes: usize,

    /// Ordering among words with equal counts.
    /// Default: first-seen.
    pub tie_order: TieOrder,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            tie_order: TieOrder::default(),
        }
    }
}

impl Config {
    /// Reads a JSON config file; missing keys take their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_upload_bytes == 0 {
            return Err(Error::Config("max_upload_bytes must be > 0".to_string()));
        }
        Ok(())
    }
}
