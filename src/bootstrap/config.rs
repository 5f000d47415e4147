//! # Configuration Loader
//!
//! Reads the TOML configuration file into [`AppConfig`]. Every section and
//! field is optional; missing values take their defaults. A missing file is
//! not an error, a malformed one is.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;
use wp_core::TourSettings;
use wp_infra::onboarding_store::DEFAULT_ONBOARDING_STATE_FILE;

const APP_DIR: &str = "waypoint";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub tour: TourSettings,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Onboarding state file; `<data dir>/waypoint/onboarding.json` if unset.
    pub state_file: Option<PathBuf>,
}

impl StorageConfig {
    pub fn state_file_path(&self) -> anyhow::Result<PathBuf> {
        if let Some(path) = &self.state_file {
            return Ok(path.clone());
        }
        let data_dir = dirs::data_dir().context("Failed to determine the user data directory")?;
        Ok(data_dir.join(APP_DIR).join(DEFAULT_ONBOARDING_STATE_FILE))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Also write logs to `waypoint.log` in this directory.
    pub directory: Option<PathBuf>,
    /// Filter directives used when `RUST_LOG` is unset, e.g. `"info,wp_app=debug"`.
    pub level: Option<String>,
}

/// `<config dir>/waypoint/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
}

/// Load configuration from a TOML file, falling back to defaults when the
/// file does not exist.
pub fn load_config(config_path: &Path) -> anyhow::Result<AppConfig> {
    if !config_path.exists() {
        return Ok(AppConfig::default());
    }
    let content = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", config_path.display()))
}
