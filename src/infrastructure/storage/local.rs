use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::domain::{ports::ObjectStore, DomainError};

/// Filesystem-backed object store for development. The bucket is a directory,
/// object keys map to relative paths below it.
pub struct LocalObjectStore {
    root: PathBuf,
}

impl LocalObjectStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    async fn ensure_bucket(&self) {
        if let Err(e) = tokio::fs::create_dir_all(&self.root).await {
            tracing::debug!(root = %self.root.display(), error = %e, "bucket directory check failed");
        }
    }

    fn object_path(&self, object_key: &str) -> Result<PathBuf, DomainError> {
        let relative = Path::new(object_key);
        let escapes = relative.components().any(|c| {
            !matches!(c, std::path::Component::Normal(_))
        });
        if escapes {
            return Err(DomainError::storage(format!("invalid object key: {object_key}")));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl ObjectStore for LocalObjectStore {
    fn kind(&self) -> &'static str {
        "local"
    }

    async fn store(&self, local_path: &Path, object_key: &str) -> Result<(), DomainError> {
        self.ensure_bucket().await;

        let target = self.object_path(object_key)?;
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| DomainError::storage(e.to_string()))?;
        }

        tokio::fs::copy(local_path, &target)
            .await
            .map_err(|e| DomainError::storage(e.to_string()))?;

        tracing::debug!(object_key, path = %target.display(), "object stored");
        Ok(())
    }
}
