//! Widget configuration (`~/.config/quote-widget/config.toml`).
//!
//! Every section is optional; a missing file yields the defaults, which
//! point at the public JSONPlaceholder posts endpoint and sync every 10s.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::paths;

pub const DEFAULT_ENDPOINT: &str = "https://jsonplaceholder.typicode.com/posts";
pub const DEFAULT_BATCH_LIMIT: usize = 5;
pub const DEFAULT_REMOTE_CATEGORY: &str = "General";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;
pub const DEFAULT_INTERVAL_SECONDS: u64 = 10;

const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetConfig {
    #[serde(default)]
    pub remote: RemoteConfig,
    #[serde(default)]
    pub sync: SyncConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Remote quote source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    /// List resource: `GET` returns the batch, `POST` accepts new quotes.
    pub endpoint: String,
    /// Only the first `batch_limit` records of a fetch are considered.
    pub batch_limit: usize,
    /// Category assigned to every fetched record.
    pub default_category: String,
    /// Per-request timeout.
    pub timeout_seconds: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            batch_limit: DEFAULT_BATCH_LIMIT,
            default_category: DEFAULT_REMOTE_CATEGORY.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// When false, the remote source is replaced by a no-op.
    pub enabled: bool,
    pub interval_seconds: u64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_seconds: DEFAULT_INTERVAL_SECONDS,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Override for the durable storage directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    /// Override for the session-scoped storage directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_dir: Option<PathBuf>,
}

impl WidgetConfig {
    /// Load from the default location.
    ///
    /// Returns `Default` if the file does not exist or if the config
    /// directory cannot be determined (e.g., no HOME in containers).
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load from an explicit path; a missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        Ok(config)
    }

    /// Path to `~/.config/quote-widget/config.toml`.
    pub fn config_path() -> Option<PathBuf> {
        paths::config_dir().map(|dir| dir.join(CONFIG_FILE_NAME))
    }

    /// Effective durable storage directory.
    pub fn data_dir(&self) -> PathBuf {
        self.storage.data_dir.clone().unwrap_or_else(paths::data_dir)
    }

    /// Effective session storage directory.
    pub fn session_dir(&self) -> PathBuf {
        self.storage
            .session_dir
            .clone()
            .unwrap_or_else(paths::session_dir)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }

    /// Commented config template written by `quotes config init`.
    pub fn default_template() -> String {
        format!(
            r#"# Quote Widget Configuration
# Location: ~/.config/quote-widget/config.toml

[remote]
endpoint = "{DEFAULT_ENDPOINT}"
batch_limit = {DEFAULT_BATCH_LIMIT}          # Only the first N fetched records are merged
default_category = "{DEFAULT_REMOTE_CATEGORY}"  # Category given to every fetched quote
timeout_seconds = {DEFAULT_TIMEOUT_SECONDS}

[sync]
enabled = true
interval_seconds = {DEFAULT_INTERVAL_SECONDS}      # Period of `quotes watch` reconciliation

[storage]
# data_dir = "/path/to/durable/state"
# session_dir = "/path/to/session/state"
"#
        )
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
