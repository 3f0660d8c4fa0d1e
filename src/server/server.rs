use std::sync::Arc;

use anyhow::{Context, Result};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::select;
use tokio::signal::unix::{signal, SignalKind};
use tracing::{error, info};

use crate::cache::token_store::FileTokenStore;
use crate::config::settings::SettingsConfig;
use crate::observability::metrics::{get_metrics, Metrics};
use crate::observability::routes::MetricsState;
use crate::query::dispatcher::QueryDispatcher;
use crate::server::consulta::handle_consulta;
use crate::sources::auth::PredictusAuth;
use crate::utils::constants::{CONSULTA_PATH, HEALTH_PATH};

/// Dispatcher wired for production: file-backed token slot, Predictus login.
pub type Dispatcher = QueryDispatcher<FileTokenStore, PredictusAuth>;

#[derive(Clone)]
pub struct AppState {
    pub metrics_state: MetricsState,
    pub dispatcher: Arc<Dispatcher>,
}

impl AppState {
    pub fn new(metrics: &Metrics, dispatcher: Arc<Dispatcher>) -> Self {
        Self {
            metrics_state: MetricsState::new(metrics.registry.clone()),
            dispatcher,
        }
    }
}

pub fn router(settings_config: &SettingsConfig, state: AppState) -> Router {
    Router::new()
        .route(CONSULTA_PATH, post(handle_consulta))
        .route(HEALTH_PATH, get(health))
        .merge(state.metrics_state.router(&settings_config.metrics))
        .with_state(state)
}

/// Serve the query API until SIGINT/SIGTERM.
pub async fn start(settings_config: &SettingsConfig, dispatcher: Arc<Dispatcher>) -> Result<()> {
    let metrics = get_metrics().await;
    let state = AppState::new(metrics, dispatcher);
    let app = router(settings_config, state);

    let bind_addr = format!("{}:{}", settings_config.server.host, settings_config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("binding {}", bind_addr))?;
    info!("listening on {}", bind_addr);

    metrics.up.set(1);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("http server failed")?;
    metrics.up.set(0);

    Ok(())
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn shutdown_signal() {
    let (mut sigint, mut sigterm) = match (
        signal(SignalKind::interrupt()),
        signal(SignalKind::terminate()),
    ) {
        (Ok(sigint), Ok(sigterm)) => (sigint, sigterm),
        _ => {
            error!("installing signal handlers failed, shutdown only by process kill");
            return std::future::pending().await;
        }
    };
    select! {
        _ = sigint.recv() => info!("Received SIGINT (Ctrl+C). Initiating graceful shutdown..."),
        _ = sigterm.recv() => info!("Received SIGTERM. Initiating graceful shutdown..."),
    }
}
