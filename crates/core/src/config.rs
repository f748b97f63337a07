// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Dispatcher configuration
//!
//! Every field has a default, so an empty TOML document is a valid config:
//!
//! ```toml
//! worker_name = "zone-events"
//! initial_timestep = 0
//! stamp_unset_timestamps = true
//! ```

use serde::Deserialize;
use std::io;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DispatcherConfig {
    /// Name of the dispatcher's worker thread
    pub worker_name: String,
    /// Timestep the dispatcher starts at, before any tick
    pub initial_timestep: u64,
    /// Treat a zero timestamp as "now" (the current timestep) when queueing
    pub stamp_unset_timestamps: bool,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            worker_name: "event-dispatcher".to_string(),
            initial_timestep: 0,
            stamp_unset_timestamps: true,
        }
    }
}

impl DispatcherConfig {
    /// Parse configuration from TOML content
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.worker_name.trim().is_empty() {
            return Err(ConfigError::Invalid("worker_name must not be empty".to_string()));
        }
        if self.worker_name.contains('\0') {
            return Err(ConfigError::Invalid("worker_name must not contain NUL".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
