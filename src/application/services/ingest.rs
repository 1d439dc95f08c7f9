use std::sync::Arc;

use tempfile::TempPath;
use tracing::instrument;

use crate::domain::{
    ports::{ObjectStore, Translator},
    DomainError, IngestOutcome, UploadedDocument,
};
use crate::infrastructure::{EmbeddingGenerator, ExtractionChain, VectorIndexGateway};

/// One uploaded file waiting for ingestion. The temp file is deleted when the
/// request is consumed, whatever the outcome.
pub struct IngestRequest {
    pub file: TempPath,
    pub filename: String,
    pub target_lang: Option<String>,
}

impl IngestRequest {
    pub fn new(file: TempPath, filename: impl Into<String>) -> Self {
        Self {
            file,
            filename: filename.into(),
            target_lang: None,
        }
    }

    pub fn with_target_lang(mut self, lang: Option<String>) -> Self {
        self.target_lang = lang;
        self
    }
}

/// store → extract → embed → (translate ∥ index) → cleanup.
pub struct IngestService {
    object_store: Arc<dyn ObjectStore>,
    extraction: Arc<ExtractionChain>,
    embedding: Arc<EmbeddingGenerator>,
    vector_index: Arc<VectorIndexGateway>,
    translator: Arc<dyn Translator>,
}

impl IngestService {
    pub fn new(
        object_store: Arc<dyn ObjectStore>,
        extraction: Arc<ExtractionChain>,
        embedding: Arc<EmbeddingGenerator>,
        vector_index: Arc<VectorIndexGateway>,
        translator: Arc<dyn Translator>,
    ) -> Self {
        Self {
            object_store,
            extraction,
            embedding,
            vector_index,
            translator,
        }
    }

    #[instrument(skip(self, request), fields(filename = %request.filename))]
    pub async fn ingest(&self, request: IngestRequest) -> Result<IngestOutcome, DomainError> {
        let IngestRequest {
            file,
            filename,
            target_lang,
        } = request;

        let doc = UploadedDocument::new(file.to_path_buf(), filename);
        let result = self.run(doc, target_lang.as_deref()).await;

        // Error paths and cancellation are covered by TempPath's drop.
        let path = file.to_path_buf();
        if let Err(e) = file.close() {
            tracing::warn!(path = %path.display(), error = %e, "failed to remove upload temp file");
        }

        result
    }

    async fn run(
        &self,
        mut doc: UploadedDocument,
        target_lang: Option<&str>,
    ) -> Result<IngestOutcome, DomainError> {
        self.object_store
            .store(doc.local_path(), &doc.object_key)
            .await
            .map_err(|e| {
                tracing::error!(object_key = %doc.object_key, error = %e, "object store write failed");
                DomainError::ingestion(format!("object store write failed: {e}"))
            })?;

        let text = self
            .extraction
            .extract(doc.local_path(), &doc.original_filename)
            .await;
        doc.extracted_text = Some(text);
        let text = doc.index_text();

        doc.embedding = self.embedding.embed(&text).await;

        let translate = async {
            match target_lang {
                None => None,
                Some(lang) => match self.translator.translate(&text, lang).await {
                    Ok(translated) => Some(translated),
                    Err(e) => {
                        tracing::warn!(lang, error = %e, "translation failed, omitting translated text");
                        None
                    }
                },
            }
        };
        let index = self
            .vector_index
            .index(&doc.object_key, &text, doc.embedding.as_ref());

        let (translated, indexed) = tokio::join!(translate, index);
        doc.translated_text = translated;

        let backend = indexed.map_err(|e| {
            tracing::error!(object_key = %doc.object_key, error = %e, "indexing failed");
            DomainError::ingestion(format!("indexing failed: {e}"))
        })?;

        tracing::info!(
            object_key = %doc.object_key,
            backend = %backend,
            chars = text.len(),
            translated = doc.translated_text.is_some(),
            "document ingested"
        );

        Ok(IngestOutcome {
            object_key: doc.object_key,
            translated_text: doc.translated_text,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::config::{EmbeddingConfig, VectorConfig};
    use crate::infrastructure::{LocalObjectStore, PassthroughTranslator};
    use async_trait::async_trait;
    use std::path::{Path, PathBuf};

    struct DownStore;

    #[async_trait]
    impl ObjectStore for DownStore {
        fn kind(&self) -> &'static str {
            "down"
        }

        async fn store(&self, _: &Path, _: &str) -> Result<(), DomainError> {
            Err(DomainError::storage("connection refused"))
        }
    }

    struct Upper;

    #[async_trait]
    impl Translator for Upper {
        fn name(&self) -> &'static str {
            "upper"
        }

        async fn translate(&self, text: &str, lang: &str) -> Result<String, DomainError> {
            Ok(format!("[{lang}] {}", text.to_uppercase()))
        }
    }

    struct Failing;

    #[async_trait]
    impl Translator for Failing {
        fn name(&self) -> &'static str {
            "failing"
        }

        async fn translate(&self, _: &str, _: &str) -> Result<String, DomainError> {
            Err(DomainError::provider("quota exceeded"))
        }
    }

    struct Fixture {
        dir: tempfile::TempDir,
        gateway: Arc<VectorIndexGateway>,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                dir: tempfile::tempdir().unwrap(),
                gateway: Arc::new(VectorIndexGateway::from_config(&VectorConfig::default()).unwrap()),
            }
        }

        fn service(&self, store: Arc<dyn ObjectStore>, translator: Arc<dyn Translator>) -> IngestService {
            IngestService::new(
                store,
                Arc::new(ExtractionChain::new(Vec::new())),
                Arc::new(EmbeddingGenerator::from_config(&EmbeddingConfig::default())),
                self.gateway.clone(),
                translator,
            )
        }

        fn local_store(&self) -> Arc<dyn ObjectStore> {
            Arc::new(LocalObjectStore::new(self.dir.path().join("bucket")))
        }

        fn upload(&self, contents: &[u8]) -> (TempPath, PathBuf) {
            let uploads = self.dir.path().join("uploads");
            std::fs::create_dir_all(&uploads).unwrap();
            let file = tempfile::NamedTempFile::new_in(&uploads).unwrap();
            std::fs::write(file.path(), contents).unwrap();
            let path = file.path().to_path_buf();
            (file.into_temp_path(), path)
        }
    }

    #[tokio::test]
    async fn test_ingest_without_providers_indexes_placeholder() {
        let fx = Fixture::new();
        let service = fx.service(fx.local_store(), Arc::new(PassthroughTranslator));
        let (file, path) = fx.upload(b"fake pdf");

        let outcome = service
            .ingest(IngestRequest::new(file, "test.pdf"))
            .await
            .unwrap();

        assert!(outcome.object_key.starts_with("blueprints/"));
        assert!(outcome.object_key.ends_with("_test.pdf"));
        assert!(outcome.translated_text.is_none());
        assert!(!path.exists());

        let stored = fx.dir.path().join("bucket").join(&outcome.object_key);
        assert_eq!(std::fs::read(stored).unwrap(), b"fake pdf");

        let hits = fx.gateway.search("indexed file test.pdf", 10).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, outcome.object_key);
    }

    #[tokio::test]
    async fn test_ingest_store_failure_cleans_up() {
        let fx = Fixture::new();
        let service = fx.service(Arc::new(DownStore), Arc::new(PassthroughTranslator));
        let (file, path) = fx.upload(b"data");

        let err = service
            .ingest(IngestRequest::new(file, "a.png"))
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::IngestionFailed(_)));
        assert!(!path.exists());
        assert!(fx.gateway.stub().is_empty());
    }

    #[tokio::test]
    async fn test_ingest_translates_when_target_given() {
        let fx = Fixture::new();
        let service = fx.service(fx.local_store(), Arc::new(Upper));
        let (file, _) = fx.upload(b"data");

        let outcome = service
            .ingest(IngestRequest::new(file, "a.png").with_target_lang(Some("fr".into())))
            .await
            .unwrap();

        assert_eq!(outcome.translated_text.as_deref(), Some("[fr] INDEXED FILE A.PNG"));
    }

    #[tokio::test]
    async fn test_ingest_translation_failure_is_isolated() {
        let fx = Fixture::new();
        let service = fx.service(fx.local_store(), Arc::new(Failing));
        let (file, _) = fx.upload(b"data");

        let outcome = service
            .ingest(IngestRequest::new(file, "a.png").with_target_lang(Some("de".into())))
            .await
            .unwrap();

        assert!(outcome.translated_text.is_none());
        assert_eq!(fx.gateway.stub().len(), 1);
    }
}
