mod embedding;
mod object_store;
mod text_extractor;
mod translator;
mod vector_store;

pub use embedding::EmbeddingService;
pub use object_store::ObjectStore;
pub use text_extractor::TextExtractor;
pub use translator::Translator;
pub use vector_store::VectorIndex;
