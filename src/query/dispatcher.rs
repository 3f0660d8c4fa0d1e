use std::sync::Arc;

use http::StatusCode;
use reqwest::Client;
use tracing::{error, info, warn};

use crate::cache::token_store::TokenStore;
use crate::config::upstream::UpstreamConfig;
use crate::errors::QueryError;
use crate::helpers::time::get_instant;
use crate::observability::metrics::get_metrics;
use crate::query::kind::QueryKind;
use crate::query::payload::UpstreamRequest;
use crate::query::result::{normalize_records, QueryResult};
use crate::sources::auth::TokenSource;
use crate::sources::token_manager::TokenManager;

/// Validates a query, calls the matching upstream endpoint with a valid
/// bearer token and normalizes the outcome.
pub struct QueryDispatcher<S, A> {
    client: Client,
    config: Arc<UpstreamConfig>,
    tokens: Arc<TokenManager<S, A>>,
}

impl<S: TokenStore, A: TokenSource> QueryDispatcher<S, A> {
    pub fn new(client: Client, config: Arc<UpstreamConfig>, tokens: Arc<TokenManager<S, A>>) -> Self {
        Self { client, config, tokens }
    }

    pub fn token_manager(&self) -> &Arc<TokenManager<S, A>> {
        &self.tokens
    }

    pub async fn query(&self, kind: QueryKind, raw_value: &str) -> Result<QueryResult, QueryError> {
        let metrics = get_metrics().await;
        let start = get_instant();
        metrics.queries_total.with_label_values(&[kind.as_str()]).inc();

        let outcome = self.execute(kind, raw_value).await;

        metrics
            .query_duration
            .with_label_values(&[kind.as_str()])
            .observe(start.elapsed().as_secs_f64());
        if let Err(e) = &outcome {
            metrics
                .query_failures
                .with_label_values(&[kind.as_str(), e.reason()])
                .inc();
        }
        outcome
    }

    async fn execute(&self, kind: QueryKind, raw_value: &str) -> Result<QueryResult, QueryError> {
        kind.validate(raw_value)?;

        let token = self.tokens.get_valid_token().await?;
        let request = UpstreamRequest::build(kind, raw_value, &self.config);

        info!("querying processes by {}", kind);
        let response = self
            .client
            .post(&request.url)
            .bearer_auth(token)
            .timeout(self.config.query_timeout())
            .json(&request.payload)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;

        if status.is_success() {
            let records = normalize_records(status == StatusCode::NO_CONTENT, &body);
            info!("{} query returned {} processes", kind, records.len());
            return Ok(QueryResult::new(kind, raw_value, records));
        }

        match status {
            StatusCode::UNAUTHORIZED => {
                error!("upstream rejected bearer token for {} query", kind);
                Err(QueryError::UpstreamAuth("upstream rejected bearer token".to_owned()))
            }
            StatusCode::NOT_FOUND => {
                info!("upstream found no process for {} query", kind);
                Err(QueryError::NotFound)
            }
            _ => {
                error!("upstream answered {} for {} query: {}", status, kind, body);
                Err(QueryError::Upstream { status, body })
            }
        }
    }
}

fn transport_error(err: reqwest::Error) -> QueryError {
    if err.is_timeout() {
        warn!("upstream query timed out: {}", err);
        QueryError::UpstreamUnavailable("upstream query timed out".to_owned())
    } else {
        warn!("upstream query failed: {}", err);
        QueryError::UpstreamUnavailable(err.to_string())
    }
}
