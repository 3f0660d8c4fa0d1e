//! Configuration validation with aggregated errors.
//! - Aggregates all issues into Vec<String>
//! - Checks server, metrics, upstream endpoints, credentials and token cache

use tracing::{error, info};

use crate::config::settings::{LoggingConfig, MetricsConfig, ServerConfig, ServiceConfig, TokenCacheConfig};
use crate::config::upstream::UpstreamConfig;

const ALLOWED_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Public entrypoint: returns Ok(()) or Err(Vec<String>) containing all issues.
pub fn validate_service_config(cfg: &ServiceConfig) -> Result<(), Vec<String>> {
    let mut errors: Vec<String> = Vec::new();

    validate_server(&cfg.settings.server, &mut errors);
    validate_metrics(&cfg.settings.metrics, &mut errors);
    if let Some(logging) = &cfg.settings.logging {
        validate_logging(logging, &mut errors);
    }
    validate_upstream(&cfg.upstream, &mut errors);
    validate_token_cache(&cfg.token_cache, &mut errors);

    if errors.is_empty() {
        info!("config validation passed");
        Ok(())
    } else {
        for e in &errors {
            error!("config validation: {}", e);
        }
        Err(errors)
    }
}

fn validate_server(server: &ServerConfig, errors: &mut Vec<String>) {
    if server.host.trim().is_empty() {
        errors.push("settings.server.host must not be empty".to_string());
    }
    if server.port.parse::<u16>().is_err() {
        errors.push(format!(
            "settings.server.port '{}' is not a valid port",
            server.port
        ));
    }
}

fn validate_metrics(metrics: &MetricsConfig, errors: &mut Vec<String>) {
    if metrics.is_enabled && !metrics.path.starts_with('/') {
        errors.push(format!(
            "settings.metrics.path '{}' must start with '/'",
            metrics.path
        ));
    }
}

fn validate_logging(logging: &LoggingConfig, errors: &mut Vec<String>) {
    if !ALLOWED_LOG_LEVELS.contains(&logging.level.to_lowercase().as_str()) {
        errors.push(format!(
            "settings.logging.level '{}' must be one of {:?}",
            logging.level, ALLOWED_LOG_LEVELS
        ));
    }
}

fn validate_upstream(upstream: &UpstreamConfig, errors: &mut Vec<String>) {
    for (field, url) in [
        ("auth_url", &upstream.auth_url),
        ("cpf_url", &upstream.cpf_url),
        ("cnpj_url", &upstream.cnpj_url),
        ("process_url", &upstream.process_url),
    ] {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            errors.push(format!(
                "upstream.{} '{}' must be an http(s) URL",
                field, url
            ));
        }
    }
    if upstream.username.trim().is_empty() {
        errors.push("upstream.username must not be empty".to_string());
    }
    if upstream.password.is_empty() {
        errors.push("upstream.password must not be empty".to_string());
    }
    if upstream.auth_timeout_ms == 0 {
        errors.push("upstream.auth_timeout_ms must be > 0".to_string());
    }
    if upstream.query_timeout_ms == 0 {
        errors.push("upstream.query_timeout_ms must be > 0".to_string());
    }
}

fn validate_token_cache(token_cache: &TokenCacheConfig, errors: &mut Vec<String>) {
    if token_cache.path.trim().is_empty() {
        errors.push("token_cache.path must not be empty".to_string());
    }
    if token_cache.default_expires_in_seconds == 0 {
        errors.push("token_cache.default_expires_in_seconds must be > 0".to_string());
    }
}
