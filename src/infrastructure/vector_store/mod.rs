mod in_memory;
mod pinecone;
mod qdrant;

use std::sync::Arc;

use crate::domain::{
    ports::VectorIndex, BackendKind, DomainError, Embedding, SearchResult,
};
use crate::infrastructure::config::VectorConfig;

pub use in_memory::InMemoryVectorStore;
pub use pinecone::PineconeVectorStore;
pub use qdrant::QdrantVectorStore;

/// Vector-search backends in precedence order, ending in the in-memory stub.
///
/// Each remote failure is logged and the next backend is tried. The stub
/// always accepts writes, so indexing only fails if its lock is poisoned.
pub struct VectorIndexGateway {
    remotes: Vec<Arc<dyn VectorIndex>>,
    stub: Arc<InMemoryVectorStore>,
}

impl VectorIndexGateway {
    pub fn new(remotes: Vec<Arc<dyn VectorIndex>>, stub: Arc<InMemoryVectorStore>) -> Self {
        Self { remotes, stub }
    }

    /// Resolves the backend chain once from configuration.
    pub fn from_config(config: &VectorConfig) -> Result<Self, DomainError> {
        let mut remotes: Vec<Arc<dyn VectorIndex>> = Vec::new();
        for kind in config.backend_kinds() {
            match kind {
                BackendKind::Pinecone => {
                    remotes.push(Arc::new(PineconeVectorStore::from_config(config)?))
                }
                BackendKind::Qdrant => {
                    let url = config
                        .qdrant_url
                        .as_deref()
                        .ok_or_else(|| DomainError::missing_config("QDRANT_URL"))?;
                    remotes.push(Arc::new(QdrantVectorStore::new(
                        url,
                        &config.qdrant_collection,
                    )?));
                }
                BackendKind::Memory => {}
            }
        }
        Ok(Self::new(remotes, Arc::new(InMemoryVectorStore::new())))
    }

    pub fn kinds(&self) -> Vec<BackendKind> {
        self.remotes
            .iter()
            .map(|b| b.kind())
            .chain(std::iter::once(BackendKind::Memory))
            .collect()
    }

    pub fn stub(&self) -> &Arc<InMemoryVectorStore> {
        &self.stub
    }

    /// Writes the record to the first backend that accepts it and returns
    /// which one did.
    pub async fn index(
        &self,
        id: &str,
        text: &str,
        vector: Option<&Embedding>,
    ) -> Result<BackendKind, DomainError> {
        for backend in &self.remotes {
            if vector.is_none() && backend.requires_vector() {
                tracing::debug!(backend = %backend.kind(), id, "no vector, skipping backend");
                continue;
            }
            match backend.index(id, text, vector).await {
                Ok(()) => return Ok(backend.kind()),
                Err(e) => {
                    tracing::warn!(backend = %backend.kind(), id, error = %e, "index failed, falling back");
                }
            }
        }

        self.stub.index(id, text, vector).await?;
        Ok(BackendKind::Memory)
    }

    pub async fn search(&self, query: &str, top_k: usize) -> Result<Vec<SearchResult>, DomainError> {
        for backend in &self.remotes {
            match backend.search(query, top_k).await {
                Ok(results) => return Ok(results),
                Err(e) if e.is_unsupported() => {
                    tracing::debug!(backend = %backend.kind(), "text search unsupported, skipping");
                }
                Err(e) => {
                    tracing::warn!(backend = %backend.kind(), error = %e, "search failed, falling back");
                }
            }
        }

        self.stub.search(query, top_k).await
    }
}
