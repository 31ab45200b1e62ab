//! Configuration for the `mutuals` binary.
//!
//! Values come from an optional RON file; command-line flags override them.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use clap::ValueEnum;
use log::LevelFilter;
use mutuals_core::ActionTimings;
use mutuals_engine::{ClientSettings, DEFAULT_PAGE_SIZE};
use mutuals_logging::LogDestination;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum LogTarget {
    File,
    Terminal,
    Both,
}

impl From<LogTarget> for LogDestination {
    fn from(target: LogTarget) -> Self {
        match target {
            LogTarget::File => LogDestination::File,
            LogTarget::Terminal => LogDestination::Terminal,
            LogTarget::Both => LogDestination::Both,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub target: LogTarget,
    /// One of `off`, `error`, `warn`, `info`, `debug`, `trace`.
    pub level: String,
    pub file: PathBuf,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            target: LogTarget::Terminal,
            level: "warn".to_string(),
            file: PathBuf::from("./mutuals.log"),
        }
    }
}

impl LogConfig {
    pub fn level_filter(&self) -> Result<LevelFilter> {
        self.level
            .parse()
            .map_err(|_| anyhow!("invalid log level {:?}", self.level))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api_base: String,
    pub page_size: usize,
    pub grace_ms: u64,
    pub reset_ms: u64,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub user_agent: Option<String>,
    pub log: LogConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let timings = ActionTimings::default();
        let client = ClientSettings::default();
        Self {
            api_base: client.api_base,
            page_size: DEFAULT_PAGE_SIZE,
            grace_ms: timings.grace.as_millis() as u64,
            reset_ms: timings.reset.as_millis() as u64,
            connect_timeout_secs: client.connect_timeout.as_secs(),
            request_timeout_secs: client.request_timeout.as_secs(),
            user_agent: None,
            log: LogConfig::default(),
        }
    }
}

impl AppConfig {
    /// Reads `path` if given; otherwise returns defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        ron::from_str(&text).with_context(|| format!("invalid config file {}", path.display()))
    }

    pub fn client_settings(&self) -> ClientSettings {
        let defaults = ClientSettings::default();
        ClientSettings {
            api_base: self.api_base.clone(),
            page_size: self.page_size,
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            user_agent: self.user_agent.clone().unwrap_or(defaults.user_agent),
        }
    }

    pub fn timings(&self) -> ActionTimings {
        ActionTimings {
            grace: Duration::from_millis(self.grace_ms),
            reset: Duration::from_millis(self.reset_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_without_file() {
        let config = AppConfig::load(None).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.page_size, 100);
        assert_eq!(config.timings(), ActionTimings::default());
        assert_eq!(config.client_settings().api_base, "https://api.github.com");
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("mutuals.ron");
        fs::write(
            &path,
            r#"(api_base: "http://localhost:8080", grace_ms: 10, log: (target: Both, level: "debug"))"#,
        )
        .unwrap();

        let config = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(config.api_base, "http://localhost:8080");
        assert_eq!(config.timings().grace, Duration::from_millis(10));
        assert_eq!(config.reset_ms, 3000);
        assert_eq!(config.log.target, LogTarget::Both);
        assert_eq!(config.log.level_filter().unwrap(), LevelFilter::Debug);
        assert_eq!(config.log.file, PathBuf::from("./mutuals.log"));
    }

    #[test]
    fn missing_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let err = AppConfig::load(Some(&temp.path().join("absent.ron"))).unwrap_err();
        assert!(err.to_string().contains("failed to read config file"));
    }

    #[test]
    fn bad_level_is_reported() {
        let log = LogConfig {
            level: "loud".to_string(),
            ..LogConfig::default()
        };
        assert!(log.level_filter().is_err());
    }
}
