use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::{
    ports::VectorIndex, BackendKind, DomainError, Embedding, IndexedRecord, SearchResult,
    DEFAULT_TOP_K,
};

/// Process-lifetime index used when no remote backend accepts a record.
///
/// Records are appended in arrival order and never evicted. Search is a
/// case-insensitive substring match returning at most [`DEFAULT_TOP_K`] hits.
pub struct InMemoryVectorStore {
    records: RwLock<Vec<IndexedRecord>>,
}

impl InMemoryVectorStore {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.records.read().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryVectorStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VectorIndex for InMemoryVectorStore {
    fn kind(&self) -> BackendKind {
        BackendKind::Memory
    }

    fn requires_vector(&self) -> bool {
        false
    }

    async fn index(
        &self,
        id: &str,
        text: &str,
        vector: Option<&Embedding>,
    ) -> Result<(), DomainError> {
        let mut store = self
            .records
            .write()
            .map_err(|e| DomainError::internal(e.to_string()))?;

        store.push(IndexedRecord::new(id, text, vector.cloned()));
        Ok(())
    }

    async fn search(&self, query: &str, top_k: usize) -> Result<Vec<SearchResult>, DomainError> {
        let store = self
            .records
            .read()
            .map_err(|e| DomainError::internal(e.to_string()))?;

        let needle = query.to_lowercase();
        Ok(store
            .iter()
            .filter(|record| record.text.to_lowercase().contains(&needle))
            .take(top_k.min(DEFAULT_TOP_K))
            .map(|record| SearchResult::new(record.id.clone(), &record.text))
            .collect())
    }
}
