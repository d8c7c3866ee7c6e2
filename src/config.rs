//! Persisted configuration.
//!
//! The only setting a deployment normally changes is the Solr select URL.
//! Configuration lives in a JSON file under the user's config directory;
//! a missing file means defaults.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default Solr select endpoint of the dictionary index
pub const DEFAULT_SOLR_URL: &str =
    "https://mandala-index.internal.lib.virginia.edu/solr/kmassets/select";

/// Default per-lookup timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Default listen address for `serve`
pub const DEFAULT_BIND: &str = "127.0.0.1:8080";

/// User-Agent the default index accepts; other clients get a 403
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/142.0.0.0 Safari/537.36";

/// Referer the default index expects
pub const DEFAULT_REFERER: &str = "https://staging.thlib.org";

/// Service configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Solr select URL of the dictionary index
    pub solr_url: String,
    /// Timeout for a single lookup, in seconds
    pub timeout_secs: u64,
    /// User-Agent sent to the index
    pub user_agent: String,
    /// Referer sent to the index, if any
    pub referer: Option<String>,
    /// Listen address of the HTTP endpoint
    pub bind: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            solr_url: DEFAULT_SOLR_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            referer: Some(DEFAULT_REFERER.to_string()),
            bind: DEFAULT_BIND.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a file, falling back to defaults if it does not exist
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Write configuration to a file, creating parent directories
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Lookup timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Get the default configuration file path
/// Returns <config dir>/tibphrase/config.json
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tibphrase")
        .join("config.json")
}
