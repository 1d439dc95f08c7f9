use serde::{Deserialize, Serialize};

use super::Embedding;

pub const DEFAULT_TOP_K: usize = 10;
pub const SNIPPET_MAX_CHARS: usize = 300;

/// A document as held by a vector-search backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexedRecord {
    pub id: String,
    pub text: String,
    pub vector: Option<Embedding>,
}

impl IndexedRecord {
    pub fn new(id: impl Into<String>, text: impl Into<String>, vector: Option<Embedding>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            vector,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: String,
    pub snippet: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f32>,
}

impl SearchResult {
    pub fn new(id: impl Into<String>, text: &str) -> Self {
        Self {
            id: id.into(),
            snippet: snippet(text),
            score: None,
        }
    }

    pub fn with_score(mut self, score: f32) -> Self {
        self.score = Some(score);
        self
    }
}

/// Cuts `text` to at most [`SNIPPET_MAX_CHARS`] characters.
pub fn snippet(text: &str) -> String {
    match text.char_indices().nth(SNIPPET_MAX_CHARS) {
        Some((end, _)) => text[..end].to_string(),
        None => text.to_string(),
    }
}

/// Vector-search backends, in the order they are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    Pinecone,
    Qdrant,
    Memory,
}

impl BackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pinecone => "pinecone",
            Self::Qdrant => "qdrant",
            Self::Memory => "memory",
        }
    }
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
