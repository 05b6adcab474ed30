use std::path::PathBuf;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::auth::errors::SessionStoreError;

/// One storage slot: holds at most one opaque string value.
///
/// The session store composes a volatile and a durable slot; the slots
/// themselves know nothing about sessions or tokens.
#[async_trait]
pub trait StorageSlot: Send + Sync + 'static {
    /// Current slot contents, if any.
    async fn load(&self) -> Option<String>;

    /// Replace the slot contents.
    async fn store(&self, value: &str) -> Result<(), SessionStoreError>;

    /// Empty the slot. Idempotent; never fails.
    async fn discard(&self);
}

/// In-memory slot: dies with the process, like tab-scoped browser storage.
pub struct VolatileSlot {
    value: RwLock<Option<String>>,
}

impl VolatileSlot {
    pub fn new() -> Self {
        Self {
            value: RwLock::new(None),
        }
    }
}

impl Default for VolatileSlot {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StorageSlot for VolatileSlot {
    async fn load(&self) -> Option<String> {
        self.value.read().await.clone()
    }

    async fn store(&self, value: &str) -> Result<(), SessionStoreError> {
        *self.value.write().await = Some(value.to_string());
        Ok(())
    }

    async fn discard(&self) {
        *self.value.write().await = None;
    }
}

/// File-backed slot: survives restarts, like durable browser storage.
pub struct FileSlot {
    path: PathBuf,
}

impl FileSlot {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait]
impl StorageSlot for FileSlot {
    async fn load(&self) -> Option<String> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => {
                let contents = contents.trim().to_string();
                (!contents.is_empty()).then_some(contents)
            }
            Err(_) => None,
        }
    }

    async fn store(&self, value: &str) -> Result<(), SessionStoreError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| SessionStoreError::Io(e.to_string()))?;
        }
        tokio::fs::write(&self.path, value)
            .await
            .map_err(|e| SessionStoreError::Io(e.to_string()))
    }

    async fn discard(&self) {
        // Missing file and removed file are the same end state.
        let _ = tokio::fs::remove_file(&self.path).await;
    }
}
