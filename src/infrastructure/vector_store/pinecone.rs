use async_trait::async_trait;
use serde::Serialize;

use crate::domain::{ports::VectorIndex, BackendKind, DomainError, Embedding, SearchResult};
use crate::infrastructure::config::VectorConfig;

/// Managed Pinecone index, written through its REST upsert endpoint.
pub struct PineconeVectorStore {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

#[derive(Serialize)]
struct UpsertRequest<'a> {
    vectors: [PineconeVector<'a>; 1],
}

#[derive(Serialize)]
struct PineconeVector<'a> {
    id: &'a str,
    values: &'a [f32],
    metadata: Metadata<'a>,
}

#[derive(Serialize)]
struct Metadata<'a> {
    text: &'a str,
}

impl PineconeVectorStore {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &VectorConfig) -> Result<Self, DomainError> {
        let api_key = config
            .pinecone_api_key
            .as_deref()
            .ok_or_else(|| DomainError::missing_config("PINECONE_API_KEY"))?;
        let env = config
            .pinecone_env
            .as_deref()
            .ok_or_else(|| DomainError::missing_config("PINECONE_ENV"))?;

        let base_url = config.pinecone_base_url.clone().unwrap_or_else(|| {
            format!("https://{}-{}.svc.pinecone.io", config.pinecone_index, env)
        });
        Ok(Self::new(api_key, base_url))
    }
}

#[async_trait]
impl VectorIndex for PineconeVectorStore {
    fn kind(&self) -> BackendKind {
        BackendKind::Pinecone
    }

    async fn index(
        &self,
        id: &str,
        text: &str,
        vector: Option<&Embedding>,
    ) -> Result<(), DomainError> {
        let values = vector
            .map(Embedding::as_slice)
            .ok_or_else(|| DomainError::validation("pinecone upsert needs a vector"))?;

        let body = UpsertRequest {
            vectors: [PineconeVector {
                id,
                values,
                metadata: Metadata { text },
            }],
        };

        self.client
            .post(format!("{}/vectors/upsert", self.base_url))
            .header("Api-Key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| DomainError::provider(format!("pinecone upsert failed: {e}")))?
            .error_for_status()
            .map_err(|e| DomainError::provider(format!("pinecone upsert rejected: {e}")))?;

        Ok(())
    }

    async fn search(&self, _query: &str, _top_k: usize) -> Result<Vec<SearchResult>, DomainError> {
        Err(DomainError::unsupported("pinecone cannot answer text queries"))
    }
}
