pub mod config;
pub mod embedding;
pub mod extraction;
pub mod storage;
pub mod translation;
pub mod vector_store;

pub use self::config::{AppConfig, ConfigError, LogFormat};
pub use embedding::{CharCodeEmbedding, EmbeddingGenerator, TextEmbedding};
pub use extraction::{DonutExtractor, ExtractionChain, TesseractExtractor};
pub use storage::{build_object_store, LocalObjectStore, MinioObjectStore, StorageKind};
pub use translation::{build_translator, GoogleTranslator, PassthroughTranslator};
pub use vector_store::{
    InMemoryVectorStore, PineconeVectorStore, QdrantVectorStore, VectorIndexGateway,
};
