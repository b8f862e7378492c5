use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigurationError, Result};

#[cfg(test)]
mod tests;

/// Request timeout applied to every call when the configuration sets none.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

fn default_verify_tls() -> bool {
    true
}

/// Connection settings for one Wazuh manager.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ClientConfig {
    pub url: String,
    pub username: String,
    pub password: String,
    /// API version such as `"4.7.3"`; detected from `/manager/info` when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Verify the manager's TLS certificate. Turning this off is logged as a
    /// warning every time a client is built.
    #[serde(default = "default_verify_tls")]
    pub verify_tls: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl ClientConfig {
    pub fn new(
        url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            username: username.into(),
            password: password.into(),
            version: None,
            verify_tls: true,
            timeout_secs: None,
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn with_verify_tls(mut self, verify: bool) -> Self {
        self.verify_tls = verify;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_secs = Some(timeout.as_secs());
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT)
    }
}

/// Reads and writes the TOML settings file.
pub struct ConfigManager;

impl ConfigManager {
    pub fn get_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("com", "wazuh", "wazuh-sdk")
            .or_else(|| ProjectDirs::from("", "", "wazuh-sdk"))
            .ok_or_else(|| {
                ConfigurationError::Settings("no home directory to store settings in".to_string())
            })?;
        Ok(proj_dirs.config_dir().join("config.toml"))
    }

    pub fn load() -> Result<ClientConfig> {
        Self::load_from(&Self::get_config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<ClientConfig> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigurationError::Settings(format!("cannot read {}: {e}", path.display()))
        })?;
        let config: ClientConfig = toml::from_str(&content).map_err(|e| {
            ConfigurationError::Settings(format!("cannot parse {}: {e}", path.display()))
        })?;
        Ok(config)
    }

    pub fn save(config: &ClientConfig) -> Result<()> {
        Self::save_to(config, &Self::get_config_path()?)
    }

    pub fn save_to(config: &ClientConfig, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(|e| {
                ConfigurationError::Settings(format!("cannot create {}: {e}", dir.display()))
            })?;
        }
        let content = toml::to_string_pretty(config)
            .map_err(|e| ConfigurationError::Settings(e.to_string()))?;
        fs::write(path, content).map_err(|e| {
            ConfigurationError::Settings(format!("cannot write {}: {e}", path.display()))
        })?;
        Ok(())
    }
}
