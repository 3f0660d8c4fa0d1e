use std::future::Future;
use std::sync::Arc;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::upstream::UpstreamConfig;
use crate::errors::AuthError;
use crate::helpers::time::fractional_seconds_to_ms;

/// Token as issued by the upstream auth endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct IssuedToken {
    pub access_token: String,
    /// Lifetime in millis, when upstream reports one.
    pub expires_in_ms: Option<i64>,
}

pub trait TokenSource: Send + Sync {
    fn fetch_token(&self) -> impl Future<Output = Result<IssuedToken, AuthError>> + Send;
}

#[derive(Serialize)]
struct AuthRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct AuthResponse {
    #[serde(rename = "accessToken")]
    access_token: Option<String>,
    #[serde(rename = "expiresIn")]
    expires_in: Option<f64>,
}

/// Fixed-credential login against the Predictus auth endpoint.
#[derive(Debug, Clone)]
pub struct PredictusAuth {
    client: Client,
    config: Arc<UpstreamConfig>,
}

impl PredictusAuth {
    pub fn new(client: Client, config: Arc<UpstreamConfig>) -> Self {
        Self { client, config }
    }
}

impl TokenSource for PredictusAuth {
    async fn fetch_token(&self) -> Result<IssuedToken, AuthError> {
        info!("requesting upstream token from '{}'", self.config.auth_url);
        let response = self
            .client
            .post(&self.config.auth_url)
            .timeout(self.config.auth_timeout())
            .json(&AuthRequest {
                username: &self.config.username,
                password: &self.config.password,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AuthError::Status(status));
        }

        let body = response.text().await?;
        parse_auth_response(&body)
            .inspect(|issued| debug!("upstream token issued, expires_in_ms: {:?}", issued.expires_in_ms))
    }
}

fn parse_auth_response(body: &str) -> Result<IssuedToken, AuthError> {
    let parsed: AuthResponse =
        serde_json::from_str(body).map_err(|e| AuthError::InvalidResponse(e.to_string()))?;

    let access_token = parsed
        .access_token
        .filter(|t| !t.is_empty())
        .ok_or(AuthError::MissingAccessToken)?;

    // zero or negative lifetimes fall back to the configured default
    let expires_in_ms = parsed
        .expires_in
        .filter(|secs| secs.is_finite() && *secs > 0.0)
        .map(fractional_seconds_to_ms);

    Ok(IssuedToken { access_token, expires_in_ms })
}
