use async_trait::async_trait;
use qdrant_client::qdrant::{
    Condition, CreateCollectionBuilder, Distance, Filter, PointStruct, ScrollPointsBuilder,
    UpsertPointsBuilder, VectorParamsBuilder,
};
use qdrant_client::{Payload, Qdrant};
use uuid::Uuid;

use crate::domain::{
    ports::VectorIndex, BackendKind, DomainError, Embedding, SearchResult, EMBEDDING_DIMENSION,
};

/// Self-hosted Qdrant collection.
pub struct QdrantVectorStore {
    client: Qdrant,
    collection: String,
}

impl QdrantVectorStore {
    /// Builds the client. No request is made until the first index or search.
    pub fn new(url: &str, collection: &str) -> Result<Self, DomainError> {
        let client = Qdrant::from_url(url)
            .build()
            .map_err(|e| DomainError::provider(e.to_string()))?;

        Ok(Self {
            client,
            collection: collection.to_string(),
        })
    }

    /// Creates the collection when it is missing. Errors are ignored; the
    /// upsert that follows reports a real outage.
    async fn ensure_collection(&self, dimension: usize) {
        let exists = match self.client.collection_exists(&self.collection).await {
            Ok(exists) => exists,
            Err(e) => {
                tracing::debug!(collection = %self.collection, error = %e, "collection check failed");
                return;
            }
        };

        if !exists {
            let created = self
                .client
                .create_collection(
                    CreateCollectionBuilder::new(&self.collection)
                        .vectors_config(VectorParamsBuilder::new(dimension as u64, Distance::Cosine)),
                )
                .await;
            if let Err(e) = created {
                tracing::debug!(collection = %self.collection, error = %e, "collection creation failed");
            }
        }
    }

    /// Qdrant only accepts integer or UUID point ids, so object keys are
    /// mapped to a stable UUIDv5.
    fn point_id(id: &str) -> String {
        Uuid::new_v5(&Uuid::NAMESPACE_URL, id.as_bytes()).to_string()
    }
}

#[async_trait]
impl VectorIndex for QdrantVectorStore {
    fn kind(&self) -> BackendKind {
        BackendKind::Qdrant
    }

    async fn index(
        &self,
        id: &str,
        text: &str,
        vector: Option<&Embedding>,
    ) -> Result<(), DomainError> {
        let vector = vector.ok_or_else(|| DomainError::validation("qdrant upsert needs a vector"))?;
        let dimension = if vector.is_empty() {
            EMBEDDING_DIMENSION
        } else {
            vector.dimension()
        };
        self.ensure_collection(dimension).await;

        let payload: Payload = serde_json::json!({ "id": id, "text": text })
            .try_into()
            .map_err(|_| DomainError::internal("Failed to create payload"))?;

        let point = PointStruct::new(Self::point_id(id), vector.as_slice().to_vec(), payload);

        self.client
            .upsert_points(UpsertPointsBuilder::new(&self.collection, vec![point]))
            .await
            .map_err(|e| DomainError::provider(e.to_string()))?;

        Ok(())
    }

    // Known gap: this is a keyword-match filter on the stored text. The query
    // is never embedded and no vector similarity is computed, so only records
    // whose text equals the query match.
    async fn search(&self, query: &str, top_k: usize) -> Result<Vec<SearchResult>, DomainError> {
        let filter = Filter::must([Condition::matches("text", query.to_string())]);

        let response = self
            .client
            .scroll(
                ScrollPointsBuilder::new(&self.collection)
                    .filter(filter)
                    .limit(top_k as u32)
                    .with_payload(true),
            )
            .await
            .map_err(|e| DomainError::provider(e.to_string()))?;

        Ok(response
            .result
            .into_iter()
            .filter_map(|point| {
                let payload = point.payload;
                let id = payload.get("id")?.as_str()?.to_string();
                let text = payload.get("text")?.as_str()?.to_string();
                Some(SearchResult::new(id, &text))
            })
            .collect())
    }
}
