use async_trait::async_trait;

use crate::domain::{ports::EmbeddingService, DomainError, Embedding, EMBEDDING_DIMENSION};

/// Code unit substituted for NUL characters.
const NUL_SUBSTITUTE: u16 = 31;

/// Deterministic pseudo-embedding built from the text's UTF-16 code units.
///
/// Component `i` is `(unit[i % len] % 100) / 100`. The vector carries no
/// semantic meaning; it only keeps the pipeline running when no embedding
/// provider is configured.
#[derive(Debug, Clone, Copy)]
pub struct CharCodeEmbedding {
    dimension: usize,
}

impl CharCodeEmbedding {
    pub fn new(dimension: usize) -> Self {
        Self { dimension }
    }

    /// Returns `None` for empty text.
    pub fn generate(&self, text: &str) -> Option<Embedding> {
        let units: Vec<u16> = text.encode_utf16().collect();
        if units.is_empty() {
            return None;
        }

        let vec = (0..self.dimension)
            .map(|i| {
                let unit = match units[i % units.len()] {
                    0 => NUL_SUBSTITUTE,
                    u => u,
                };
                f32::from(unit % 100) / 100.0
            })
            .collect();
        Some(Embedding::new(vec))
    }
}

impl Default for CharCodeEmbedding {
    fn default() -> Self {
        Self::new(EMBEDDING_DIMENSION)
    }
}

#[async_trait]
impl EmbeddingService for CharCodeEmbedding {
    fn name(&self) -> &'static str {
        "char-code"
    }

    async fn embed(&self, text: &str) -> Result<Embedding, DomainError> {
        self.generate(text)
            .ok_or_else(|| DomainError::validation("cannot embed empty text"))
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}
