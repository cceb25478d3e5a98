//! Configuration management for tradectl
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from a YAML file, environment variables, and CLI overrides.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TradectlError};
use crate::logger::LogLevel;

/// Main configuration structure for tradectl.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Backend API settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// Session lifecycle settings.
    #[serde(default)]
    pub session: SessionConfig,

    /// Log buffer settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Backend API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the dashboard backend, e.g. `http://localhost:5000/api`.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_base_url() -> String {
    "http://localhost:5000/api".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl ApiConfig {
    /// Per-request timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

/// Session lifecycle settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Idle window (seconds) after which the session expires.
    #[serde(default = "default_idle_timeout_seconds")]
    pub idle_timeout_seconds: u64,

    /// Interval (seconds) between background validity checks.
    #[serde(default = "default_poll_interval_seconds")]
    pub poll_interval_seconds: u64,

    /// Durable storage backend: `keyring` or `memory`.
    #[serde(default = "default_storage_backend")]
    pub storage: String,

    /// Keyring service-name prefix; change to isolate deployments.
    #[serde(default = "default_keyring_service")]
    pub keyring_service: String,
}

fn default_idle_timeout_seconds() -> u64 {
    300
}

fn default_poll_interval_seconds() -> u64 {
    60
}

fn default_storage_backend() -> String {
    "keyring".to_string()
}

fn default_keyring_service() -> String {
    "tradectl".to_string()
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            idle_timeout_seconds: default_idle_timeout_seconds(),
            poll_interval_seconds: default_poll_interval_seconds(),
            storage: default_storage_backend(),
            keyring_service: default_keyring_service(),
        }
    }
}

impl SessionConfig {
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_seconds)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_seconds)
    }
}

/// Log buffer settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Minimum level mirrored to the console: debug, info, warn, error.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Maximum number of buffered log entries.
    #[serde(default = "default_buffer_capacity")]
    pub buffer_capacity: usize,

    /// Error de-duplication window in seconds.
    #[serde(default = "default_dedup_window_seconds")]
    pub dedup_window_seconds: u64,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_buffer_capacity() -> usize {
    1000
}

fn default_dedup_window_seconds() -> u64 {
    5
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            buffer_capacity: default_buffer_capacity(),
            dedup_window_seconds: default_dedup_window_seconds(),
        }
    }
}

impl LoggingConfig {
    pub fn min_level(&self) -> LogLevel {
        LogLevel::parse_or_default(&self.level)
    }

    pub fn dedup_window(&self) -> Duration {
        Duration::from_secs(self.dedup_window_seconds)
    }
}

/// Values the CLI (or an embedder) layers over the file configuration.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Replaces `api.base_url` when set.
    pub api_url: Option<String>,
    /// Forces the mirrored log level to debug.
    pub verbose: bool,
}

impl Config {
    /// Loads configuration from `path`, then applies environment and CLI
    /// overrides.
    ///
    /// A missing file is not an error; defaults are used so a fresh install
    /// works with zero setup. Override precedence, lowest to highest: file,
    /// `TRADECTL_API_URL`, CLI flags.
    pub fn load(path: &Path, overrides: &ConfigOverrides) -> Result<Self> {
        let mut config = if path.exists() {
            let raw = std::fs::read_to_string(path).map_err(TradectlError::Io)?;
            serde_yaml::from_str(&raw).map_err(TradectlError::Yaml)?
        } else {
            tracing::debug!("config file {} not found, using defaults", path.display());
            Config::default()
        };

        if let Ok(url) = std::env::var("TRADECTL_API_URL") {
            if !url.is_empty() {
                config.api.base_url = url;
            }
        }
        if let Some(url) = &overrides.api_url {
            config.api.base_url = url.clone();
        }
        if overrides.verbose {
            config.logging.level = "debug".to_string();
        }

        Ok(config)
    }

    /// Validates the configuration, rejecting values the client cannot run
    /// with.
    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.api.base_url).map_err(|e| {
            TradectlError::Config(format!("invalid api.base_url '{}': {}", self.api.base_url, e))
        })?;

        if self.api.timeout_seconds == 0 {
            return Err(TradectlError::Config(
                "api.timeout_seconds must be greater than zero".to_string(),
            )
            .into());
        }
        if self.logging.buffer_capacity == 0 {
            return Err(TradectlError::Config(
                "logging.buffer_capacity must be greater than zero".to_string(),
            )
            .into());
        }
        if self.session.poll_interval_seconds == 0 {
            return Err(TradectlError::Config(
                "session.poll_interval_seconds must be greater than zero".to_string(),
            )
            .into());
        }
        match self.session.storage.as_str() {
            "keyring" | "memory" => Ok(()),
            other => Err(TradectlError::Config(format!(
                "unknown session.storage backend '{}', expected 'keyring' or 'memory'",
                other
            ))
            .into()),
        }
    }
}

/// Default config file location: `$XDG_CONFIG_HOME/tradectl/config.yaml`
/// (or the platform equivalent), falling back to `config/config.yaml` in the
/// working directory when the platform directories cannot be determined.
pub fn default_config_path() -> PathBuf {
    directories::ProjectDirs::from("io", "tradectl", "tradectl")
        .map(|dirs| dirs.config_dir().join("config.yaml"))
        .unwrap_or_else(|| PathBuf::from("config/config.yaml"))
}
