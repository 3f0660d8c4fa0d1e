use prometheus::{Histogram, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, IntGauge, Opts, Registry};
use tracing::info;
use std::sync::Arc;
use tokio::sync::OnceCell;


// Declare the static OnceCell to hold the Metrics.
static METRICS_INSTANCE: OnceCell<Arc<Metrics>> = OnceCell::const_new();

/// Asynchronously initializes and gets a reference to the static `Metrics`.
pub async fn get_metrics() -> &'static Arc<Metrics> {
    METRICS_INSTANCE.get_or_init(|| async {
        info!("Initializing Metrics ...");
        Metrics::new()}
    ).await
}


#[derive(Clone)]
pub struct Metrics {
    pub registry: Registry,

    // Query metrics
    pub queries_total: IntCounterVec,
    pub query_failures: IntCounterVec,
    pub query_duration: HistogramVec,

    // Token metrics
    pub token_cache_hits: IntCounter,
    pub token_refresh_total: IntCounter,
    pub token_refresh_failures: IntCounter,
    pub token_refresh_duration: Histogram,

    // Config/runtime
    pub config_validation_errors: IntCounter,
    pub up: IntGauge,
}

impl Metrics {
    fn new() -> Arc<Self> {
        let registry = Registry::new_custom(Some("processual".into()), None).unwrap();

        let metrics: Arc<Metrics> = Arc::new(Self {
            // Query
            queries_total: IntCounterVec::new(Opts::new("queries_total", "Total queries by kind"),&["kind"],).unwrap(),
            query_failures: IntCounterVec::new(Opts::new("query_failures_total", "Query failures by kind and reason"),&["kind", "reason"],).unwrap(),
            query_duration: HistogramVec::new(HistogramOpts::new("query_duration_seconds", "Query duration seconds").buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 15.0]),&["kind"],).unwrap(),

            // Token
            token_cache_hits: IntCounter::new("token_cache_hits_total", "Queries served with the cached upstream token").unwrap(),
            token_refresh_total: IntCounter::new("token_refresh_total", "Upstream token fetch attempts").unwrap(),
            token_refresh_failures: IntCounter::new("token_refresh_failures_total", "Failed upstream token fetches").unwrap(),
            token_refresh_duration: Histogram::with_opts(HistogramOpts::new("token_refresh_duration_seconds", "Upstream token fetch duration").buckets(vec![0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0])).unwrap(),

            // Config/runtime
            config_validation_errors: IntCounter::new("config_validation_errors_total","Validation errors during startup",).unwrap(),
            up: IntGauge::new("up", "1 if service is healthy").unwrap(),

            registry,
        });

        // Register all metrics in the registry
        let reg = &metrics.registry;
        reg.register(Box::new(metrics.queries_total.clone())).unwrap();
        reg.register(Box::new(metrics.query_failures.clone())).unwrap();
        reg.register(Box::new(metrics.query_duration.clone())).unwrap();
        reg.register(Box::new(metrics.token_cache_hits.clone())).unwrap();
        reg.register(Box::new(metrics.token_refresh_total.clone())).unwrap();
        reg.register(Box::new(metrics.token_refresh_failures.clone())).unwrap();
        reg.register(Box::new(metrics.token_refresh_duration.clone())).unwrap();
        reg.register(Box::new(metrics.config_validation_errors.clone())).unwrap();
        reg.register(Box::new(metrics.up.clone())).unwrap();

        metrics
    }
}
