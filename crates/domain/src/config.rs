use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;

use crate::reply_code::ReplyCode;

/// Main configuration structure for Captive DNS
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Server configuration (port, bind address, poll cadence)
    #[serde(default)]
    pub server: ServerConfig,

    /// Redirect behaviour (target domain, resolved address, reply tuning)
    #[serde(default)]
    pub redirect: RedirectConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_dns_port")]
    pub port: u16,

    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Milliseconds between poll-loop ticks in the bundled binary.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RedirectConfig {
    /// Domain answered with `address`; `"*"` catches every name.
    #[serde(default = "default_domain")]
    pub domain: String,

    /// IPv4 address every matched query resolves to.
    #[serde(default = "default_address")]
    pub address: Ipv4Addr,

    /// Answer TTL in seconds.
    #[serde(default = "default_ttl")]
    pub ttl: u32,

    /// RCODE sent for well-formed queries that do not match `domain`.
    #[serde(default)]
    pub error_reply_code: ReplyCode,

    /// Strip a leading `www.` from both the configured domain and every
    /// query name before comparison.
    #[serde(default = "default_false")]
    pub strip_www_prefix: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_dns_port() -> u16 {
    53
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_poll_interval_ms() -> u64 {
    10
}

fn default_domain() -> String {
    crate::name_filter::WILDCARD.to_string()
}

fn default_address() -> Ipv4Addr {
    Ipv4Addr::new(192, 168, 4, 1)
}

fn default_ttl() -> u32 {
    60
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_false() -> bool {
    false
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_dns_port(),
            bind_address: default_bind_address(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

impl Default for RedirectConfig {
    fn default() -> Self {
        Self {
            domain: default_domain(),
            address: default_address(),
            ttl: default_ttl(),
            error_reply_code: ReplyCode::default(),
            strip_www_prefix: false,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            redirect: RedirectConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. captive-dns.toml in current directory
    /// 3. /etc/captive-dns/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new("captive-dns.toml").exists() {
            Self::from_file("captive-dns.toml")?
        } else if std::path::Path::new("/etc/captive-dns/config.toml").exists() {
            Self::from_file("/etc/captive-dns/config.toml")?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(port) = overrides.port {
            self.server.port = port;
        }
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(domain) = overrides.domain {
            self.redirect.domain = domain;
        }
        if let Some(address) = overrides.address {
            self.redirect.address = address;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("DNS port cannot be 0".to_string()));
        }
        if self.redirect.domain.is_empty() {
            return Err(ConfigError::Validation(
                "Redirect domain cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Save configuration to file
    pub fn save(&self, path: &str) -> Result<(), ConfigError> {
        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Parse(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, toml_string)
            .map_err(|e| ConfigError::FileWrite(path.to_string(), e.to_string()))?;
        Ok(())
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub port: Option<u16>,
    pub bind_address: Option<String>,
    pub domain: Option<String>,
    pub address: Option<Ipv4Addr>,
    pub log_level: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {0}: {1}")]
    FileRead(String, String),

    #[error("Failed to write config file {0}: {1}")]
    FileWrite(String, String),

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Configuration validation error: {0}")]
    Validation(String),
}
