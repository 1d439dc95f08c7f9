mod document;
mod embedding;
mod search;

pub use document::{
    object_key_for, placeholder_text, sanitize_filename, IngestOutcome, UploadedDocument,
    OBJECT_KEY_PREFIX,
};
pub use embedding::{Embedding, EMBEDDING_DIMENSION};
pub use search::{
    snippet, BackendKind, IndexedRecord, SearchResult, DEFAULT_TOP_K, SNIPPET_MAX_CHARS,
};
