use crate::domain::{errors::DomainError, BackendKind, Embedding, SearchResult};
use async_trait::async_trait;

/// A vector-search backend storing `(id, text, vector)` triples.
#[async_trait]
pub trait VectorIndex: Send + Sync {
    fn kind(&self) -> BackendKind;

    /// Whether `index` needs an embedding. Backends that do are skipped for
    /// records without one.
    fn requires_vector(&self) -> bool {
        true
    }

    async fn index(
        &self,
        id: &str,
        text: &str,
        vector: Option<&Embedding>,
    ) -> Result<(), DomainError>;

    /// Text query. Backends that can only answer vector queries return
    /// `DomainError::Unsupported`.
    async fn search(&self, query: &str, top_k: usize) -> Result<Vec<SearchResult>, DomainError>;
}
