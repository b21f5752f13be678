//! # Configuration
//!
//! Layered the usual way: built-in defaults, then a TOML file, then `KVB_` environment
//! variables with `__` separating nested keys (`KVB_SCHEDULER__POLL_INTERVAL_SECS=5`).

use crate::model::{LocationCreate, ProductCreate};
use crate::window::WindowConfig;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KvbConfig {
    /// Written to the settings table on first start, when no window is stored yet.
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub scheduler: SchedulerConfig,
    #[serde(default)]
    pub tables: TablesConfig,
    #[serde(default)]
    pub seed: SeedConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulerConfig {
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
    /// Pause before the lottery winner is shown.
    #[serde(default = "default_reveal_delay_ms")]
    pub reveal_delay_ms: u64,
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval_secs(),
            reveal_delay_ms: default_reveal_delay_ms(),
            channel_capacity: default_channel_capacity(),
        }
    }
}

impl SchedulerConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs.max(1))
    }

    pub fn reveal_delay(&self) -> Duration {
        Duration::from_millis(self.reveal_delay_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TablesConfig {
    /// Requests a table queues before callers have to wait.
    #[serde(default = "default_buffer_size")]
    pub buffer_size: usize,
}

impl Default for TablesConfig {
    fn default() -> Self {
        Self {
            buffer_size: default_buffer_size(),
        }
    }
}

/// Catalogue created at startup for an empty system.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeedConfig {
    #[serde(default)]
    pub products: Vec<ProductCreate>,
    #[serde(default)]
    pub locations: Vec<LocationCreate>,
}

fn default_poll_interval_secs() -> u64 {
    30
}

fn default_reveal_delay_ms() -> u64 {
    1500
}

fn default_channel_capacity() -> usize {
    32
}

fn default_buffer_size() -> usize {
    64
}

impl KvbConfig {
    /// Loads defaults, the file at `path` if given, then the environment.
    ///
    /// A missing file is not an error; figment treats it as empty.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(KvbConfig::default()));
        if let Some(path) = path {
            figment = figment.merge(Toml::file(path));
        }
        figment
            .merge(Env::prefixed("KVB_").split("__"))
            .extract()
            .map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    /// Defaults overlaid with a TOML document. Ignores the environment.
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        Figment::from(Serialized::defaults(KvbConfig::default()))
            .merge(Toml::string(toml))
            .extract()
            .map_err(|e| ConfigError::Invalid(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = KvbConfig::from_toml_str("").unwrap();

        assert_eq!(config.window, WindowConfig::default());
        assert_eq!(config.window.to_string(), "15:45-16:00");
        assert_eq!(config.scheduler.poll_interval(), Duration::from_secs(30));
        assert_eq!(config.scheduler.reveal_delay(), Duration::from_millis(1500));
        assert_eq!(config.scheduler.channel_capacity, 32);
        assert_eq!(config.tables.buffer_size, 64);
        assert!(config.seed.products.is_empty());
    }

    #[test]
    fn test_file_overrides_defaults() {
        let config = KvbConfig::from_toml_str(
            r#"
            [window]
            start_hour = 16
            start_minute = 0
            end_hour = 16
            end_minute = 30

            [scheduler]
            reveal_delay_ms = 0

            [tables]
            buffer_size = 8

            [[seed.products]]
            name = "Pils"
            available_on_days = [4, 5]

            [[seed.locations]]
            name = "Kantine"
            floor = 1
            "#,
        )
        .unwrap();

        assert_eq!(config.window.to_string(), "16:00-16:30");
        assert_eq!(config.scheduler.reveal_delay_ms, 0);
        assert_eq!(config.scheduler.poll_interval_secs, 30);
        assert_eq!(config.tables.buffer_size, 8);
        assert_eq!(config.scheduler.channel_capacity, 32);
        assert_eq!(config.seed.products, vec![ProductCreate::new("Pils", [4, 5])]);
        assert_eq!(config.seed.locations, vec![LocationCreate::new("Kantine", 1)]);
    }

    #[test]
    fn test_poll_interval_never_zero() {
        let config = KvbConfig::from_toml_str("[scheduler]\npoll_interval_secs = 0").unwrap();
        assert_eq!(config.scheduler.poll_interval(), Duration::from_secs(1));
    }

    #[test]
    fn test_invalid_value_is_reported() {
        let err = KvbConfig::from_toml_str("[scheduler]\npoll_interval_secs = \"soon\"").unwrap_err();
        assert!(err.to_string().starts_with("Invalid configuration"));
    }
}
