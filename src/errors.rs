//! Error taxonomy of the query core.
//!
//! Everything leaving [`QueryDispatcher::query`](crate::query::dispatcher::QueryDispatcher::query)
//! is a [`QueryError`]; transport errors never cross that boundary raw.

use http::StatusCode;
use thiserror::Error;

/// Rejected input. Safe to show to the end user verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("query kind and value are required")]
    MissingInput,

    #[error("unsupported query kind '{0}'")]
    UnsupportedKind(String),

    #[error("invalid CPF")]
    InvalidCpf,

    #[error("invalid CNPJ")]
    InvalidCnpj,

    #[error("invalid process number")]
    InvalidProcessNumber,
}

/// Failure to obtain a bearer token from the upstream auth endpoint.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("auth request failed: {0}")]
    Request(String),

    #[error("auth request timed out")]
    Timeout,

    #[error("auth endpoint answered {0}")]
    Status(StatusCode),

    #[error("accessToken missing from auth response")]
    MissingAccessToken,

    #[error("invalid auth response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for AuthError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AuthError::Timeout
        } else {
            AuthError::Request(err.to_string())
        }
    }
}

/// Token cache persistence failure.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("token cache io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("token cache serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum QueryError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Token could not be obtained, or upstream rejected it with 401.
    #[error("upstream authentication failed: {0}")]
    UpstreamAuth(String),

    /// Explicit 404 from upstream. Zero results is not an error.
    #[error("no process found")]
    NotFound,

    #[error("upstream answered {status}")]
    Upstream { status: StatusCode, body: String },

    /// Network failure or timeout.
    #[error("upstream unavailable: {0}")]
    UpstreamUnavailable(String),
}

impl From<AuthError> for QueryError {
    fn from(err: AuthError) -> Self {
        QueryError::UpstreamAuth(err.to_string())
    }
}

impl QueryError {
    /// Short label used for metrics.
    pub fn reason(&self) -> &'static str {
        match self {
            QueryError::Validation(_) => "validation",
            QueryError::UpstreamAuth(_) => "upstream_auth",
            QueryError::NotFound => "not_found",
            QueryError::Upstream { .. } => "upstream",
            QueryError::UpstreamUnavailable(_) => "unavailable",
        }
    }
}
