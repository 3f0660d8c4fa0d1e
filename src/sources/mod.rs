//! Sources module
//!
//! Upstream bearer-token source and the manager that keeps the cached token fresh.

pub mod auth;
pub mod token_manager;

pub use auth::{IssuedToken, PredictusAuth, TokenSource};
pub use token_manager::TokenManager;
