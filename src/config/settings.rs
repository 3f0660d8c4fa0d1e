use serde::Deserialize;

use crate::config::upstream::UpstreamConfig;
use crate::utils::constants::{DEFAULT_TOKEN_CACHE_PATH, DEFAULT_TOKEN_LIFETIME_SECS};

/// Root of the YAML configuration file.
#[derive(Debug, Deserialize, Clone)]
pub struct ServiceConfig {
    pub settings: SettingsConfig,
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub token_cache: TokenCacheConfig,
}

/// ================================
/// Global service-wide settings
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct SettingsConfig {
    #[serde(default)]
    pub metrics: MetricsConfig,
    pub server: ServerConfig,
    pub logging: Option<LoggingConfig>
}

#[derive(Debug, Deserialize, Clone)]
pub struct MetricsConfig {
    #[serde(default = "default_metrics_path")]
    pub path: String,
    #[serde(default)]
    pub is_enabled: bool,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self { path: default_metrics_path(), is_enabled: false }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: String
}

/// ================================
/// Token cache
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct TokenCacheConfig {
    /// File holding the single cached `{token, expiresAt}` record.
    #[serde(default = "default_token_cache_path")]
    pub path: String,
    /// Used when the auth response carries no `expiresIn`.
    #[serde(default = "default_expires_in_seconds")]
    pub default_expires_in_seconds: u64,
}

impl Default for TokenCacheConfig {
    fn default() -> Self {
        Self {
            path: default_token_cache_path(),
            default_expires_in_seconds: default_expires_in_seconds(),
        }
    }
}

/// ================================
/// Logging
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String, // allowed: trace, debug, info, warn, error
    pub format: LogFormat,
}

impl LoggingConfig {
    pub fn new (level: String, format: LogFormat) -> Self {
        Self { level, format }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_owned(), format: LogFormat::Compact }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Compact,
}

fn default_metrics_path() -> String {
    "/metrics".to_string()
}

fn default_token_cache_path() -> String {
    DEFAULT_TOKEN_CACHE_PATH.to_string()
}

fn default_expires_in_seconds() -> u64 {
    DEFAULT_TOKEN_LIFETIME_SECS
}
