use std::future::Future;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::cache::token::CachedToken;
use crate::errors::StoreError;

/// Durable single-slot storage for the upstream bearer token.
pub trait TokenStore: Send + Sync {
    /// Current record, `None` when absent or unreadable.
    fn load(&self) -> impl Future<Output = Option<CachedToken>> + Send;

    /// Overwrite the slot.
    fn save(&self, token: &CachedToken) -> impl Future<Output = Result<(), StoreError>> + Send;
}

/// Token slot backed by a JSON file, written atomically (tmp -> rename).
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    async fn load(&self) -> Option<CachedToken> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("token cache '{}' not found", self.path.display());
                return None;
            }
            Err(e) => {
                warn!("token cache '{}' unreadable: {}", self.path.display(), e);
                return None;
            }
        };

        serde_json::from_str::<CachedToken>(&raw)
            .inspect_err(|e| warn!("token cache '{}' unparsable: {}", self.path.display(), e))
            .ok()
    }

    async fn save(&self, token: &CachedToken) -> Result<(), StoreError> {
        let content = serde_json::to_string_pretty(token)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let tmp = self.path.with_extension("tmp");
        tokio::fs::write(&tmp, content.as_bytes()).await?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            tokio::fs::set_permissions(&tmp, std::fs::Permissions::from_mode(0o600)).await?;
        }
        tokio::fs::rename(&tmp, &self.path).await?;

        debug!("token cache '{}' written", self.path.display());
        Ok(())
    }
}

/// In-process token slot, for tests and ephemeral deployments.
#[derive(Debug, Clone, Default)]
pub struct MemoryTokenStore {
    inner: Arc<RwLock<Option<CachedToken>>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: CachedToken) -> Self {
        Self { inner: Arc::new(RwLock::new(Some(token))) }
    }
}

impl TokenStore for MemoryTokenStore {
    async fn load(&self) -> Option<CachedToken> {
        self.inner.read().await.clone()
    }

    async fn save(&self, token: &CachedToken) -> Result<(), StoreError> {
        *self.inner.write().await = Some(token.clone());
        Ok(())
    }
}
