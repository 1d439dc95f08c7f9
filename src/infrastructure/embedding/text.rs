use std::sync::Arc;

use async_trait::async_trait;
use rig::client::EmbeddingsClient;
use rig::embeddings::EmbeddingModel;
use rig::providers::openai;

use crate::domain::{ports::EmbeddingService, DomainError, Embedding};
use crate::infrastructure::config::EmbeddingConfig;

/// OpenAI embeddings through `rig`.
pub struct TextEmbedding {
    client: Arc<openai::Client>,
    model: String,
    dimension: usize,
}

impl TextEmbedding {
    pub fn new(api_key: &str) -> Result<Self, DomainError> {
        let client = openai::Client::new(api_key)
            .map_err(|e| DomainError::provider(format!("failed to build OpenAI client: {e}")))?;
        Ok(Self::from_client(client))
    }

    /// Client against an OpenAI-compatible endpoint other than the public API.
    pub fn with_base_url(api_key: &str, base_url: &str) -> Result<Self, DomainError> {
        let client = openai::Client::builder()
            .api_key(api_key)
            .base_url(base_url)
            .build()
            .map_err(|e| DomainError::provider(format!("failed to build OpenAI client: {e}")))?;
        Ok(Self::from_client(client))
    }

    fn from_client(client: openai::Client) -> Self {
        Self {
            client: Arc::new(client),
            model: openai::TEXT_EMBEDDING_3_SMALL.to_string(),
            dimension: crate::domain::EMBEDDING_DIMENSION,
        }
    }

    pub fn from_config(config: &EmbeddingConfig) -> Result<Self, DomainError> {
        let api_key = config
            .openai_api_key
            .as_deref()
            .ok_or_else(|| DomainError::missing_config("OPENAI_API_KEY"))?;
        let embedding = match config.openai_base_url.as_deref() {
            Some(base_url) => Self::with_base_url(api_key, base_url)?,
            None => Self::new(api_key)?,
        };
        Ok(embedding
            .with_model(&config.model)
            .with_dimension(config.dimension))
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_dimension(mut self, dimension: usize) -> Self {
        self.dimension = dimension;
        self
    }
}

#[async_trait]
impl EmbeddingService for TextEmbedding {
    fn name(&self) -> &'static str {
        "openai"
    }

    async fn embed(&self, text: &str) -> Result<Embedding, DomainError> {
        let model = self
            .client
            .embedding_model_with_ndims(&self.model, self.dimension);

        let embedding = model
            .embed_text(text)
            .await
            .map_err(|e| DomainError::provider(e.to_string()))?;

        let vec_f32: Vec<f32> = embedding.vec.into_iter().map(|x| x as f32).collect();
        if vec_f32.len() != self.dimension {
            return Err(DomainError::provider(format!(
                "expected {} dimensions, got {}",
                self.dimension,
                vec_f32.len()
            )));
        }
        Ok(Embedding::new(vec_f32))
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}
