use crate::error::{ChainError, Result};
use crate::model::{ChainType, DEFAULT_CHAIN_TYPE};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_URL: &str = "http://localhost:6688";

pub const ENV_URL: &str = "CHAINCTL_URL";
pub const ENV_CHAIN_TYPE: &str = "CHAINCTL_CHAIN_TYPE";
pub const ENV_CONFIG_DIR: &str = "CHAINCTL_CONFIG_DIR";

/// Client configuration, read from a hand-written `<config dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClientConfig {
    /// Root URL of the node's HTTP API
    #[serde(default = "default_url")]
    pub url: String,

    /// Chain namespace used when none is given on the command line
    #[serde(default = "default_chain_type")]
    pub chain_type: String,

    /// Request timeout in seconds; unset means no timeout
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

fn default_url() -> String {
    DEFAULT_URL.to_string()
}

fn default_chain_type() -> String {
    DEFAULT_CHAIN_TYPE.to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            chain_type: default_chain_type(),
            timeout_secs: None,
        }
    }
}

impl ClientConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: ClientConfig = serde_json::from_str(&content).map_err(|e| {
            ChainError::validation(format!("invalid config {}: {}", config_path.display(), e))
        })?;
        Ok(config)
    }

    /// Applies `CHAINCTL_URL` and `CHAINCTL_CHAIN_TYPE` when set.
    pub fn with_env(self) -> Self {
        self.with_overrides(
            std::env::var(ENV_URL).ok(),
            std::env::var(ENV_CHAIN_TYPE).ok(),
        )
    }

    /// Applies explicit overrides; empty values are ignored.
    pub fn with_overrides(mut self, url: Option<String>, chain_type: Option<String>) -> Self {
        if let Some(url) = url.filter(|u| !u.trim().is_empty()) {
            self.url = url;
        }
        if let Some(chain_type) = chain_type.filter(|t| !t.trim().is_empty()) {
            self.chain_type = chain_type;
        }
        self
    }

    pub fn chain_type(&self) -> Result<ChainType> {
        self.chain_type.parse()
    }
}

/// Directory holding `config.json`: `CHAINCTL_CONFIG_DIR` if set, else the
/// platform config dir.
pub fn config_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var(ENV_CONFIG_DIR) {
        if !dir.is_empty() {
            return Some(PathBuf::from(dir));
        }
    }
    ProjectDirs::from("com", "chainctl", "chainctl").map(|dirs| dirs.config_dir().to_path_buf())
}
