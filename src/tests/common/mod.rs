// tests/common/mod.rs
#![cfg(test)]

pub use axum::Router;
pub use serde_json::json;
pub use tokio::task::JoinHandle;

use std::net::SocketAddr;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;

use crate::cache::token::CachedToken;
use crate::cache::token_store::{MemoryTokenStore, TokenStore};
use crate::config::settings::TokenCacheConfig;
use crate::config::upstream::UpstreamConfig;
use crate::errors::AuthError;
use crate::helpers::time::now_ms;
use crate::query::dispatcher::QueryDispatcher;
use crate::sources::auth::{IssuedToken, PredictusAuth, TokenSource};
use crate::sources::token_manager::TokenManager;

pub const AUTH_PATH: &str = "/auth";
pub const CPF_PATH: &str = "/processos/judiciais/buscarPorCPFParte";
pub const CNPJ_PATH: &str = "/processos/judiciais/buscarPorCNPJParte";
pub const PROCESS_PATH: &str = "/processos/judiciais/buscarPorNumeroProcesso";

pub const VALID_CPF: &str = "529.982.247-25";
pub const VALID_CNPJ: &str = "11.222.333/0001-81";
pub const VALID_PROCESS_NUMBER: &str = "0001234-56.2023.8.26.0100";

/// Spawn an Axum router on an ephemeral port and return (JoinHandle, SocketAddr)
pub async fn spawn_axum(router: Router) -> (JoinHandle<()>, SocketAddr) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind failed");
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        axum::serve(listener, router).await.expect("server failed");
    });
    (handle, addr)
}

pub fn build_reqwest_client() -> Client {
    Client::builder()
        .timeout(Duration::from_secs(5))
        .build()
        .expect("reqwest client")
}

pub fn upstream_config(base_url: &str) -> UpstreamConfig {
    UpstreamConfig::with_base_url(base_url, "agent", "s3cret")
}

pub fn valid_token(value: &str) -> CachedToken {
    CachedToken::new(value.to_owned(), now_ms() + 600_000)
}

pub fn expired_token(value: &str) -> CachedToken {
    CachedToken::new(value.to_owned(), now_ms() - 1_000)
}

/// Dispatcher against `base_url` with an in-memory slot already holding a valid token.
pub fn memory_dispatcher(
    base_url: &str,
    token: &str,
) -> QueryDispatcher<MemoryTokenStore, PredictusAuth> {
    memory_dispatcher_with(upstream_config(base_url), MemoryTokenStore::with_token(valid_token(token)))
}

pub fn memory_dispatcher_with(
    config: UpstreamConfig,
    store: MemoryTokenStore,
) -> QueryDispatcher<MemoryTokenStore, PredictusAuth> {
    let client = build_reqwest_client();
    let config = Arc::new(config);
    let auth = PredictusAuth::new(client.clone(), config.clone());
    let tokens = Arc::new(TokenManager::new(store, auth, TokenCacheConfig::default()));
    QueryDispatcher::new(client, config, tokens)
}

pub async fn write_cache_file(path: &Path, token: &CachedToken) {
    crate::cache::token_store::FileTokenStore::new(path)
        .save(token)
        .await
        .expect("seed token cache");
}

pub fn read_cache_file(path: &Path) -> CachedToken {
    let raw = std::fs::read_to_string(path).expect("read token cache");
    serde_json::from_str(&raw).expect("parse token cache")
}

/// In-process token source counting its invocations.
#[derive(Clone, Default)]
pub struct CountingSource {
    pub calls: Arc<AtomicUsize>,
    pub delay: Duration,
    pub expires_in_ms: Option<i64>,
    pub fail: bool,
}

impl CountingSource {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl TokenSource for CountingSource {
    async fn fetch_token(&self) -> Result<IssuedToken, AuthError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        tokio::time::sleep(self.delay).await;
        if self.fail {
            return Err(AuthError::Request("connection refused".to_owned()));
        }
        Ok(IssuedToken {
            access_token: format!("issued-{}", n),
            expires_in_ms: self.expires_in_ms,
        })
    }
}
