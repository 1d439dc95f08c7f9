use std::sync::Arc;
use tracing::instrument;

use crate::domain::{DomainError, SearchResult, DEFAULT_TOP_K};
use crate::infrastructure::VectorIndexGateway;

pub struct SearchService {
    vector_index: Arc<VectorIndexGateway>,
    default_top_k: usize,
}

impl SearchService {
    pub fn new(vector_index: Arc<VectorIndexGateway>) -> Self {
        Self {
            vector_index,
            default_top_k: DEFAULT_TOP_K,
        }
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.default_top_k = top_k;
        self
    }

    #[instrument(skip(self))]
    pub async fn search(&self, query: &str) -> Result<Vec<SearchResult>, DomainError> {
        self.search_top_k(query, self.default_top_k).await
    }

    #[instrument(skip(self))]
    pub async fn search_top_k(
        &self,
        query: &str,
        top_k: usize,
    ) -> Result<Vec<SearchResult>, DomainError> {
        if query.is_empty() {
            return Err(DomainError::validation("missing query"));
        }
        self.vector_index.search(query, top_k).await
    }
}
