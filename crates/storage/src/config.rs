// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Store configuration

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("no device configured")]
    MissingDevice,
}

/// How to open a [`LoggedStore`](crate::LoggedStore)
///
/// ```toml
/// device = "/dev/nvme1n1"
/// direct_io = true
/// log_level = "info"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    /// Block device, or an image file standing in for one
    pub device: PathBuf,
    /// Format the device instead of recovering from it
    pub format: bool,
    pub direct_io: bool,
    /// Default log filter for binaries embedding the store
    pub log_level: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            device: PathBuf::new(),
            format: false,
            direct_io: false,
            log_level: "warn".to_string(),
        }
    }
}

impl StoreConfig {
    pub fn for_device(device: impl Into<PathBuf>) -> Self {
        Self {
            device: device.into(),
            ..Self::default()
        }
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn with_format(mut self, format: bool) -> Self {
        self.format = format;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.device.as_os_str().is_empty() {
            return Err(ConfigError::MissingDevice);
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
