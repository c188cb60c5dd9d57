//! Configuration for waybackpdf.
//!
//! Settings come from an optional TOML file, then environment variables
//! override individual keys:
//!
//! ```toml
//! [wayback]
//! timemap_url = "https://web.archive.org/web/timemap/"
//! user_agent = "waybackpdf/0.1"
//! timeout_secs = 120
//! ```

use std::env;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::timemap::WAYBACK_TIMEMAP_URL;

/// Default user agent sent to the archive.
pub const DEFAULT_USER_AGENT: &str = concat!("waybackpdf/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse TOML config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: String, value: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub wayback: WaybackConfig,
}

/// Timemap endpoint and HTTP client settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaybackConfig {
    pub timemap_url: String,
    pub user_agent: String,
    /// Request timeout; `None` keeps the HTTP client default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Default for WaybackConfig {
    fn default() -> Self {
        Self {
            timemap_url: WAYBACK_TIMEMAP_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: None,
        }
    }
}

impl Config {
    /// Load from `path` when given, otherwise start from defaults, then apply
    /// environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::load_from_path(path)?,
            None => Self::default(),
        };
        config.with_env_overrides()
    }

    /// Load configuration from a TOML file without environment overrides.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply `WAYBACK_TIMEMAP_URL`, `WAYBACK_USER_AGENT` and
    /// `WAYBACK_TIMEOUT_SECS` from the process environment.
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        self.with_overrides(|key| env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup. Empty values are ignored.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = get("WAYBACK_TIMEMAP_URL") {
            self.wayback.timemap_url = url;
        }
        if let Some(ua) = get("WAYBACK_USER_AGENT") {
            self.wayback.user_agent = ua;
        }
        if let Some(value) = get("WAYBACK_TIMEOUT_SECS") {
            let secs = value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue {
                    key: "WAYBACK_TIMEOUT_SECS".to_string(),
                    value: value.clone(),
                })?;
            self.wayback.timeout_secs = Some(secs);
        }

        Ok(self)
    }
}
