use chrono::{SecondsFormat, Utc};
use tokio::time::Instant;

use crate::config::settings::TokenCacheConfig;

/// Token lifetime in millis: upstream `expiresIn` first, configured default otherwise.
pub fn get_token_lifetime_ms(
    expires_in_ms_response: Option<i64>,
    token_cache_config: &TokenCacheConfig,
) -> i64 {
    // upstream response level
    expires_in_ms_response
        // settings (global) level
        .unwrap_or_else(|| seconds_to_ms(token_cache_config.default_expires_in_seconds))
}

/// Whole seconds to millis, saturating at `i64::MAX`.
pub fn seconds_to_ms(seconds: u64) -> i64 {
    i64::try_from(seconds).unwrap_or(i64::MAX).saturating_mul(1000)
}

/// Fractional upstream seconds to millis; the `as` cast saturates on huge values.
pub fn fractional_seconds_to_ms(seconds: f64) -> i64 {
    (seconds * 1000.0) as i64
}

pub fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// Absolute expiry in epoch millis for a token issued now.
pub fn expires_at_ms(lifetime_ms: i64) -> i64 {
    now_ms().saturating_add(lifetime_ms)
}

pub fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn get_instant() -> Instant {
    Instant::now()
}
