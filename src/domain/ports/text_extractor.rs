use std::path::Path;

use async_trait::async_trait;

use crate::domain::errors::DomainError;

/// One link of the extraction chain.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    fn name(&self) -> &'static str;
    async fn extract(&self, local_path: &Path, filename: &str) -> Result<String, DomainError>;
}
