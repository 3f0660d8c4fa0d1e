use tokio::sync::Mutex;
use tracing::{debug, error, info};

use crate::cache::token::{CachedToken, TokenState};
use crate::cache::token_store::TokenStore;
use crate::config::settings::TokenCacheConfig;
use crate::errors::AuthError;
use crate::helpers::time::{expires_at_ms, get_instant, get_token_lifetime_ms, now_ms};
use crate::observability::metrics::get_metrics;
use crate::sources::auth::TokenSource;

/// Hands out a currently valid upstream bearer token.
///
/// Slot states: Absent -> fetch -> Valid -> Expired -> refetch. Refreshes are
/// single-flight: callers arriving during a refresh wait on `refresh_lock`
/// and then reuse the token it stored.
pub struct TokenManager<S, A> {
    store: S,
    source: A,
    cache_config: TokenCacheConfig,
    refresh_lock: Mutex<()>,
}

impl<S: TokenStore, A: TokenSource> TokenManager<S, A> {
    pub fn new(store: S, source: A, cache_config: TokenCacheConfig) -> Self {
        Self {
            store,
            source,
            cache_config,
            refresh_lock: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub async fn state(&self) -> TokenState {
        TokenState::classify(self.store.load().await, now_ms())
    }

    pub async fn get_valid_token(&self) -> Result<String, AuthError> {
        let metrics = get_metrics().await;

        if let TokenState::Valid(cached) = self.state().await {
            debug!("using cached upstream token");
            metrics.token_cache_hits.inc();
            return Ok(cached.token);
        }

        let _guard = self.refresh_lock.lock().await;

        // a refresh may have completed while we were waiting
        match self.state().await {
            TokenState::Valid(cached) => {
                debug!("using upstream token refreshed by a concurrent caller");
                metrics.token_cache_hits.inc();
                Ok(cached.token)
            }
            TokenState::Absent => {
                info!("no cached upstream token, fetching");
                self.refresh().await
            }
            TokenState::Expired(_) => {
                info!("cached upstream token expired, fetching");
                self.refresh().await
            }
        }
    }

    async fn refresh(&self) -> Result<String, AuthError> {
        let metrics = get_metrics().await;
        let start = get_instant();
        metrics.token_refresh_total.inc();

        let fetched = self.source.fetch_token().await;
        metrics.token_refresh_duration.observe(start.elapsed().as_secs_f64());
        let issued = fetched.inspect_err(|e| {
            error!("upstream token fetch failed: {}", e);
            metrics.token_refresh_failures.inc();
        })?;

        let lifetime_ms = get_token_lifetime_ms(issued.expires_in_ms, &self.cache_config);
        let cached = CachedToken::new(issued.access_token, expires_at_ms(lifetime_ms));

        // the fresh token is still returned when it cannot be persisted
        if let Err(e) = self.store.save(&cached).await {
            error!("storing upstream token failed: {}", e);
        }

        info!("upstream token refreshed, valid for {} ms", lifetime_ms);
        Ok(cached.token)
    }
}
