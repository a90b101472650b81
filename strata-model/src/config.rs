//! Model configuration, read from an optional `strata.toml`.
//!
//! ```toml
//! key_format = "v4"
//! version_format = "v7"
//! ```

use crate::error::ModelResult;
use serde::{Deserialize, Serialize};
use std::path::Path;
use strata_types::UuidFormat;
use tracing::{info, warn};

/// Settings consulted by the lifecycle hooks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// UUID version for entity keys minted on insert.
    pub key_format: UuidFormat,
    /// UUID version for version tokens minted on every save.
    pub version_format: UuidFormat,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            key_format: UuidFormat::V4,
            version_format: UuidFormat::V7,
        }
    }
}

impl ModelConfig {
    /// Parses a TOML document. Missing keys take their defaults.
    pub fn parse(contents: &str) -> ModelResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Reads and parses `path`, surfacing every failure.
    pub fn read(path: &Path) -> ModelResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Loads `path` if it exists. Falls back to defaults when the file is
    /// missing, unreadable or malformed.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            info!("No model config found at {:?}, using defaults", path);
            return Self::default();
        }
        match Self::read(path) {
            Ok(config) => {
                info!(
                    key_format = ?config.key_format,
                    version_format = ?config.version_format,
                    "Loaded model config from {:?}",
                    path
                );
                config
            }
            Err(e) => {
                warn!("Failed to load model config {:?}: {}. Using defaults.", path, e);
                Self::default()
            }
        }
    }
}
