//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::summary::{LoaderConfig, SummarySource};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub dashboard: DashboardConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Summary source configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    /// File path or http(s) URL of the summary document
    #[serde(default = "default_source")]
    pub source: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_ms: u64,

    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    #[serde(default = "default_retry_backoff")]
    pub retry_backoff_ms: u64,
}

fn default_source() -> String {
    "./public/data.json".to_string()
}

fn default_request_timeout() -> u64 {
    5000
}

fn default_max_attempts() -> u32 {
    1
}

fn default_retry_backoff() -> u64 {
    1000
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            source: default_source(),
            request_timeout_ms: default_request_timeout(),
            max_attempts: default_max_attempts(),
            retry_backoff_ms: default_retry_backoff(),
        }
    }
}

impl DataConfig {
    pub fn summary_source(&self) -> SummarySource {
        SummarySource::parse(&self.source)
    }

    pub fn loader_config(&self) -> LoaderConfig {
        LoaderConfig {
            request_timeout_ms: self.request_timeout_ms,
            max_attempts: self.max_attempts,
            retry_backoff_ms: self.retry_backoff_ms,
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Allowed CORS origins; empty allows any origin
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
        }
    }
}

impl ServerConfig {
    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Page content configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    /// Page title, also used as the main heading
    #[serde(default = "default_title")]
    pub title: String,

    #[serde(default = "default_description")]
    pub description: String,

    /// Prefix for paid amounts
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,

    /// Enterprise names shown when the summary does not carry its own list.
    /// The defaults are placeholder content, not derived from any summary.
    #[serde(default = "default_enterprise_customers")]
    pub enterprise_customers: Vec<String>,
}

fn default_title() -> String {
    "火山数据分析".to_string()
}

fn default_description() -> String {
    "客户数据可视化仪表盘".to_string()
}

fn default_currency_symbol() -> String {
    "¥".to_string()
}

fn default_enterprise_customers() -> Vec<String> {
    [
        "郑州市管城回族区抖推信息咨询服务部",
        "北京挹江科技有限公司",
        "广州橘猫电子科技有限公司",
        "河南三两友网络科技有限公司",
        "阳泉市云筑饰家电子科技有限公司",
        "湖南鹊桥数字科技有限公司",
        "绍兴市俊豪网络科技有限公司",
        "杭州则见科技合伙企业（有限合伙）",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            description: default_description(),
            currency_symbol: default_currency_symbol(),
            enterprise_customers: default_enterprise_customers(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl LoggingConfig {
    /// Install the global tracing subscriber.
    ///
    /// `RUST_LOG` takes precedence over the configured level.
    pub fn init(&self) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("volcano={},tower_http=info", self.level))
        });

        let registry = tracing_subscriber::registry().with(filter);
        if self.format.eq_ignore_ascii_case("json") {
            registry.with(tracing_subscriber::fmt::layer().json()).init();
        } else {
            registry.with(tracing_subscriber::fmt::layer()).init();
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("volcano").join("config.toml")),
            Some(PathBuf::from("/etc/volcano/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from any key lookup
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(source) = lookup("VOLCANO_DATA_SOURCE") {
            self.data.source = source;
        }

        if let Some(host) = lookup("VOLCANO_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("VOLCANO_PORT") {
            match port.parse() {
                Ok(p) => self.server.port = p,
                Err(_) => tracing::warn!("Ignoring invalid VOLCANO_PORT value {:?}", port),
            }
        }

        if let Some(level) = lookup("VOLCANO_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("VOLCANO_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Volcano Analytics Configuration
#
# Environment variables override these settings:
# - VOLCANO_DATA_SOURCE
# - VOLCANO_HOST
# - VOLCANO_PORT
# - VOLCANO_LOG_LEVEL
# - VOLCANO_LOG_FORMAT

[data]
# Summary document: a file path or an http(s) URL
source = "./public/data.json"

# Request timeout for http sources (ms)
request_timeout_ms = 5000

# Load attempts; 1 disables retry
max_attempts = 1

# Base delay between attempts (ms), multiplied by attempt squared
retry_backoff_ms = 1000

[server]
# Dashboard server host
host = "0.0.0.0"

# Dashboard server port
port = 3000

# Allowed CORS origins (empty allows any origin)
cors_origins = []

[dashboard]
title = "火山数据分析"
description = "客户数据可视化仪表盘"
currency_symbol = "¥"

# Enterprise names shown when the summary has no "enterpriseCustomers" list.
# Placeholder content; replace with your own.
enterprise_customers = [
    "郑州市管城回族区抖推信息咨询服务部",
    "北京挹江科技有限公司",
    "广州橘猫电子科技有限公司",
    "河南三两友网络科技有限公司",
    "阳泉市云筑饰家电子科技有限公司",
    "湖南鹊桥数字科技有限公司",
    "绍兴市俊豪网络科技有限公司",
    "杭州则见科技合伙企业（有限合伙）",
]

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
