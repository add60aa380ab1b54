use serde::{Deserialize, Serialize};
use std::path::Path;

use super::dns::parse_server_addr;
use super::{ConfigError, DnsConfig, HistoryConfig, LoggingConfig, MonitorConfig};

/// Default config file picked up when present and no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "dnswatch.toml";

const MIN_COLUMN_WIDTH: usize = 4;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub monitor: MonitorConfig,

    #[serde(default)]
    pub dns: DnsConfig,

    #[serde(default)]
    pub history: HistoryConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Command-line values that win over the config file.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub domains_file: Option<String>,
    pub dns_server: Option<String>,
    pub history_dir: Option<String>,
    pub refresh_interval_secs: Option<u64>,
    pub log_level: Option<String>,
}

impl Config {
    /// Loads `config_path` (or [`DEFAULT_CONFIG_FILE`] when it exists),
    /// falling back to defaults, then applies CLI overrides.
    pub fn load(config_path: Option<&str>, overrides: CliOverrides) -> Result<Self, ConfigError> {
        let path = match config_path {
            Some(path) => Some(path.to_string()),
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => Some(DEFAULT_CONFIG_FILE.to_string()),
            None => None,
        };

        let mut config = match path {
            Some(path) => {
                let text = std::fs::read_to_string(&path).map_err(|e| ConfigError::FileRead {
                    path: path.clone(),
                    reason: e.to_string(),
                })?;
                Self::from_toml(&text, &path)?
            }
            None => Config::default(),
        };

        config.apply_overrides(overrides);
        Ok(config)
    }

    pub fn from_toml(text: &str, path: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|e| ConfigError::Parse {
            path: path.to_string(),
            reason: e.to_string(),
        })
    }

    pub fn apply_overrides(&mut self, overrides: CliOverrides) {
        if let Some(file) = overrides.domains_file {
            self.monitor.domains_file = file;
        }
        if let Some(server) = overrides.dns_server {
            self.dns.server = server;
        }
        if let Some(dir) = overrides.history_dir {
            self.history.directory = dir;
        }
        if let Some(secs) = overrides.refresh_interval_secs {
            self.monitor.refresh_interval_secs = secs;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.monitor.refresh_interval_secs == 0 {
            return Err(ConfigError::Validation(
                "monitor.refresh_interval_secs must be greater than 0".to_string(),
            ));
        }
        if self.monitor.blink_interval_ms == 0 {
            return Err(ConfigError::Validation(
                "monitor.blink_interval_ms must be greater than 0".to_string(),
            ));
        }
        if self.monitor.column_width < MIN_COLUMN_WIDTH {
            return Err(ConfigError::Validation(format!(
                "monitor.column_width must be at least {}",
                MIN_COLUMN_WIDTH
            )));
        }
        if self.monitor.max_concurrent_domains == 0 {
            return Err(ConfigError::Validation(
                "monitor.max_concurrent_domains must be greater than 0".to_string(),
            ));
        }
        if self.dns.query_timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "dns.query_timeout_ms must be greater than 0".to_string(),
            ));
        }
        if parse_server_addr(&self.dns.server).is_none() {
            return Err(ConfigError::Validation(format!(
                "dns.server '{}' is not an IP address or ip:port",
                self.dns.server
            )));
        }
        Ok(())
    }
}
