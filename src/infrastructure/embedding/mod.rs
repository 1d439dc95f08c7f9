mod fallback;
mod text;

use std::sync::Arc;

use crate::domain::{ports::EmbeddingService, DomainError, Embedding};
use crate::infrastructure::config::EmbeddingConfig;

pub use fallback::CharCodeEmbedding;
pub use text::TextEmbedding;

/// Embedding providers tried in order, backed by [`CharCodeEmbedding`].
pub struct EmbeddingGenerator {
    providers: Vec<Arc<dyn EmbeddingService>>,
    fallback: CharCodeEmbedding,
}

impl EmbeddingGenerator {
    /// Providers whose vectors do not match `dimension` are dropped, so every
    /// stored vector has the same width as the fallback.
    pub fn new(providers: Vec<Arc<dyn EmbeddingService>>, dimension: usize) -> Self {
        let providers = providers
            .into_iter()
            .filter(|p| {
                let matches = p.dimension() == dimension;
                if !matches {
                    tracing::warn!(
                        provider = p.name(),
                        provider_dimension = p.dimension(),
                        dimension,
                        "embedding provider dimension mismatch, provider disabled"
                    );
                }
                matches
            })
            .collect();

        Self {
            providers,
            fallback: CharCodeEmbedding::new(dimension),
        }
    }

    pub fn from_config(config: &EmbeddingConfig) -> Self {
        let mut providers: Vec<Arc<dyn EmbeddingService>> = Vec::new();
        match TextEmbedding::from_config(config) {
            Ok(openai) => providers.push(Arc::new(openai)),
            Err(DomainError::ConfigurationMissing(_)) => {}
            Err(e) => tracing::warn!(error = %e, "OpenAI embeddings unavailable"),
        }
        Self::new(providers, config.dimension)
    }

    pub fn provider_names(&self) -> Vec<&'static str> {
        self.providers
            .iter()
            .map(|p| p.name())
            .chain(std::iter::once(self.fallback.name()))
            .collect()
    }

    /// Embeds `text`, or returns `None` when it is empty.
    pub async fn embed(&self, text: &str) -> Option<Embedding> {
        if text.is_empty() {
            return None;
        }

        for provider in &self.providers {
            match provider.embed(text).await {
                Ok(embedding) => return Some(embedding),
                Err(e) => {
                    tracing::warn!(provider = provider.name(), error = %e, "embedding failed, falling back");
                }
            }
        }
        self.fallback.generate(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    struct Broken;

    #[async_trait]
    impl EmbeddingService for Broken {
        fn name(&self) -> &'static str {
            "broken"
        }

        async fn embed(&self, _text: &str) -> Result<Embedding, DomainError> {
            Err(DomainError::provider("rate limited"))
        }

        fn dimension(&self) -> usize {
            1536
        }
    }

    struct Constant;

    #[async_trait]
    impl EmbeddingService for Constant {
        fn name(&self) -> &'static str {
            "constant"
        }

        async fn embed(&self, _text: &str) -> Result<Embedding, DomainError> {
            Ok(Embedding::new(vec![0.5; 1536]))
        }

        fn dimension(&self) -> usize {
            1536
        }
    }

    #[tokio::test]
    async fn test_unconfigured_uses_fallback() {
        let generator = EmbeddingGenerator::from_config(&EmbeddingConfig::default());
        assert_eq!(generator.provider_names(), vec!["char-code"]);

        let a = generator.embed("Indexed file a.pdf").await.unwrap();
        let b = generator.embed("Indexed file a.pdf").await.unwrap();
        assert_eq!(a.dimension(), 1536);
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn test_provider_failure_falls_back() {
        let generator = EmbeddingGenerator::new(vec![Arc::new(Broken)], 1536);
        let embedding = generator.embed("text").await.unwrap();
        assert_eq!(embedding, CharCodeEmbedding::default().generate("text").unwrap());
    }

    #[tokio::test]
    async fn test_provider_success_is_used() {
        let providers: Vec<Arc<dyn EmbeddingService>> = vec![Arc::new(Broken), Arc::new(Constant)];
        let generator = EmbeddingGenerator::new(providers, 1536);
        assert_eq!(generator.embed("text").await.unwrap().as_slice()[0], 0.5);
    }

    struct Narrow;

    #[async_trait]
    impl EmbeddingService for Narrow {
        fn name(&self) -> &'static str {
            "narrow"
        }

        async fn embed(&self, _text: &str) -> Result<Embedding, DomainError> {
            Ok(Embedding::new(vec![1.0; 384]))
        }

        fn dimension(&self) -> usize {
            384
        }
    }

    #[tokio::test]
    async fn test_mismatched_provider_is_dropped() {
        let providers: Vec<Arc<dyn EmbeddingService>> = vec![Arc::new(Narrow), Arc::new(Constant)];
        let generator = EmbeddingGenerator::new(providers, 1536);

        assert_eq!(generator.provider_names(), vec!["constant", "char-code"]);
        assert_eq!(generator.embed("text").await.unwrap().dimension(), 1536);
    }

    fn openai_config(server: &MockServer) -> EmbeddingConfig {
        EmbeddingConfig {
            openai_api_key: Some("sk-test".into()),
            openai_base_url: Some(server.uri()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_openai_vector_is_used_when_available() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/embeddings"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "object": "list",
                "data": [{ "object": "embedding", "embedding": vec![0.5; 1536], "index": 0 }],
                "model": "text-embedding-3-small",
                "usage": { "prompt_tokens": 2, "total_tokens": 2 }
            })))
            .mount(&server)
            .await;

        let generator = EmbeddingGenerator::from_config(&openai_config(&server));
        assert_eq!(generator.provider_names(), vec!["openai", "char-code"]);

        let embedding = generator.embed("beam").await.unwrap();
        assert!(embedding.as_slice().iter().all(|v| *v == 0.5));
    }

    #[tokio::test]
    async fn test_openai_server_error_falls_back_to_char_code() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/embeddings"))
            .respond_with(ResponseTemplate::new(500).set_body_string("upstream overloaded"))
            .expect(1)
            .mount(&server)
            .await;

        let generator = EmbeddingGenerator::from_config(&openai_config(&server));
        let embedding = generator.embed("beam").await.unwrap();

        assert_eq!(embedding, CharCodeEmbedding::default().generate("beam").unwrap());
    }

    #[tokio::test]
    async fn test_empty_text_is_none() {
        let generator = EmbeddingGenerator::new(vec![Arc::new(Constant)], 1536);
        assert!(generator.embed("").await.is_none());
    }
}
