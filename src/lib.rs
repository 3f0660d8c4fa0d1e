//! # Judicial-records query gateway
//!
//! Validates CPF / CNPJ / court-process-number queries, keeps a file-cached
//! bearer token for the upstream Predictus API fresh, forwards each query to
//! the matching upstream endpoint and normalizes the answer.
//!
//! Modules:
//! - `validation` — CPF, CNPJ and process-number checks
//! - `cache` — the single cached token and its stores
//! - `sources` — upstream login and the token manager
//! - `query` — payload building, dispatch and response normalization
//! - `server` — HTTP surface

pub mod cache;
pub mod config;
pub mod errors;
pub mod helpers;
pub mod observability;
pub mod query;
pub mod server;
pub mod sources;
pub mod tests;
pub mod utils;
pub mod validation;


pub use crate::errors::{QueryError, ValidationError};
pub use crate::query::{QueryDispatcher, QueryKind, QueryResult};
