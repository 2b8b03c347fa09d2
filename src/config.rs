use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use crate::mode::Mode;
use crate::problem::fetch::{DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};
use crate::proxy::DEFAULT_PORT;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),
    #[error("Invalid config format: {0}")]
    Format(#[from] toml::de::Error),
}

/// User configuration, `config.toml`:
///
/// ```toml
/// language = "python"
/// proxy_port = 3001
/// user_agent = "Mozilla/5.0 ..."
/// timeout_secs = 15
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GenieConfig {
    pub language: Option<String>,
    pub proxy_port: Option<u16>,
    pub user_agent: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl GenieConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load the discovered config file, or defaults when there is none.
    pub fn load() -> Result<Self, ConfigError> {
        match crate::config_discovery::find_config_file() {
            Some(path) => {
                log::debug!("loading config from {}", path.display());
                Self::from_file(&path)
            }
            None => Ok(Self::default()),
        }
    }

    /// Configured language, ignoring unknown ids.
    pub fn mode(&self) -> Option<Mode> {
        let id = self.language.as_deref()?;
        match id.parse() {
            Ok(mode) => Some(mode),
            Err(e) => {
                log::warn!("config: {}", e);
                None
            }
        }
    }

    pub fn proxy_port(&self) -> u16 {
        self.proxy_port.unwrap_or(DEFAULT_PORT)
    }

    pub fn user_agent(&self) -> &str {
        self.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT)
    }

    pub fn timeout(&self) -> Duration {
        self.timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT)
    }
}
