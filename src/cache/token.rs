use serde::{Deserialize, Serialize};

use crate::helpers::time::now_ms;

/// The single cached bearer token and its absolute expiry.
///
/// Serialized as `{"token": "...", "expiresAt": <epoch ms>}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedToken {
    pub token: String,
    #[serde(rename = "expiresAt")]
    pub expires_at: i64, // UNIX TIMESTAMP, millis
}

impl CachedToken {
    pub fn new(token: String, expires_at: i64) -> Self {
        Self { token, expires_at }
    }

    pub fn is_usable_at(&self, now_ms: i64) -> bool {
        now_ms < self.expires_at
    }

    pub fn is_usable(&self) -> bool {
        self.is_usable_at(now_ms())
    }
}

/// State of the token slot at a given instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenState {
    Absent,
    Valid(CachedToken),
    Expired(CachedToken),
}

impl TokenState {
    pub fn classify(cached: Option<CachedToken>, now_ms: i64) -> Self {
        match cached {
            None => TokenState::Absent,
            Some(token) if token.is_usable_at(now_ms) => TokenState::Valid(token),
            Some(token) => TokenState::Expired(token),
        }
    }
}
