//! Board configuration
//!
//! Defaults, overridden by an optional TOML file, overridden by CLI flags.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use textboard_core::errors::{ExError, ExErrorKind, Result};
use textboard_core::logging_facility::Profile;
use textboard_store::PoolConfig;

/// File looked up in the working directory when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "textboard.toml";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    Memory,
    Sqlite,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogProfile {
    Development,
    Production,
}

impl From<LogProfile> for Profile {
    fn from(profile: LogProfile) -> Self {
        match profile {
            LogProfile::Development => Profile::Development,
            LogProfile::Production => Profile::Production,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BoardConfig {
    pub storage: StorageKind,
    pub db_path: PathBuf,
    pub pool_max_size: usize,
    pub checkout_timeout_ms: u64,
    pub log_profile: LogProfile,
    pub page_size: u32,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            storage: StorageKind::Sqlite,
            db_path: PathBuf::from(".textboard/board.db"),
            pool_max_size: 4,
            checkout_timeout_ms: 5_000,
            log_profile: LogProfile::Development,
            page_size: 10,
        }
    }
}

impl BoardConfig {
    /// Load configuration from `explicit`, or from `textboard.toml` when it exists
    ///
    /// # Errors
    ///
    /// `Config` when an explicit file is unreadable or any file is not valid TOML.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.is_file() {
                    Self::from_file(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| config_error(format!("cannot read {}: {}", path.display(), e)))?;
        Self::from_toml_str(&text)
    }

    /// Parse configuration text; missing keys keep their defaults
    ///
    /// # Errors
    ///
    /// `Config` on invalid TOML, unknown keys or a zero page size.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).map_err(|e| config_error(e.to_string()))?;
        if config.page_size == 0 {
            return Err(config_error("page_size must be at least 1"));
        }
        Ok(config)
    }

    pub fn pool_config(&self) -> PoolConfig {
        let base = match self.storage {
            StorageKind::Memory => PoolConfig::memory(),
            StorageKind::Sqlite => PoolConfig::file(&self.db_path),
        };
        base.with_max_size(self.pool_max_size)
            .with_checkout_timeout(Duration::from_millis(self.checkout_timeout_ms))
    }
}

fn config_error(message: impl Into<String>) -> ExError {
    ExError::new(ExErrorKind::Config)
        .with_op("load_config")
        .with_message(message)
}
