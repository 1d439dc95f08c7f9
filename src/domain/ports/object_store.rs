use std::path::Path;

use async_trait::async_trait;

use crate::domain::errors::DomainError;

#[async_trait]
pub trait ObjectStore: Send + Sync {
    fn kind(&self) -> &'static str;

    /// Uploads the file at `local_path` under `object_key`.
    ///
    /// Fails with `DomainError::StorageUnavailable`; there is no retry.
    async fn store(&self, local_path: &Path, object_key: &str) -> Result<(), DomainError>;
}
