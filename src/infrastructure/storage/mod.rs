mod local;
mod minio;

use std::sync::Arc;

use serde::Serialize;

use crate::domain::{ports::ObjectStore, DomainError};
use crate::infrastructure::config::StorageConfig;

pub use local::LocalObjectStore;
pub use minio::MinioObjectStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    Minio,
    Local,
}

impl StorageKind {
    pub fn resolve(config: &StorageConfig) -> Self {
        if config.endpoint.is_some() {
            Self::Minio
        } else {
            Self::Local
        }
    }
}

pub fn build_object_store(config: &StorageConfig) -> Result<Arc<dyn ObjectStore>, DomainError> {
    match StorageKind::resolve(config) {
        StorageKind::Minio => Ok(Arc::new(MinioObjectStore::new(config)?)),
        StorageKind::Local => Ok(Arc::new(LocalObjectStore::new(
            config.local_dir.join(&config.bucket),
        ))),
    }
}
