/*
[INPUT]:  YAML configuration file (optional)
[OUTPUT]: Parsed console configuration and a configured API client
[POS]:    Configuration layer - service endpoint, timeouts and logging
[UPDATE]: When adding new configuration options
*/

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use interceptor_adapter::{ClientConfig, DEFAULT_BASE_URL, InterceptorClient};
use serde::{Deserialize, Serialize};

/// Top-level configuration of the console
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ConsoleConfig {
    /// Base URL of the interceptor service
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Connect timeout in seconds
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    /// Tracing filter directive, e.g. "info" or "interceptor_console=debug"
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Also write logs to this file
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            request_timeout_secs: default_request_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            log_level: default_log_level(),
            log_file: None,
        }
    }
}

fn default_api_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_log_level() -> String {
    "info".to_string()
}

impl ConsoleConfig {
    /// Load configuration from YAML file
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config: Self = serde_yaml::from_str(&content)
            .with_context(|| format!("invalid config {}", path.display()))?;
        Ok(config)
    }

    /// `<config dir>/interceptor/console.yaml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("interceptor").join("console.yaml"))
    }

    /// Explicit path must exist; the default path is used only when present
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        match Self::default_path() {
            Some(path) if path.exists() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            timeout: Duration::from_secs(self.request_timeout_secs),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
        }
    }

    pub fn build_client(&self) -> anyhow::Result<InterceptorClient> {
        InterceptorClient::with_config(self.client_config(), &self.api_url)
            .with_context(|| format!("invalid api_url {}", self.api_url))
    }
}
