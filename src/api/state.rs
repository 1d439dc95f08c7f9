use std::sync::Arc;

use serde::Serialize;

use crate::api::middleware::AuthPolicy;
use crate::application::{IngestService, SearchService};
use crate::domain::{BackendKind, DomainError};
use crate::infrastructure::{
    build_object_store, build_translator, AppConfig, EmbeddingGenerator, ExtractionChain,
    VectorIndexGateway,
};

/// Providers resolved at startup, reported by `/ready`.
#[derive(Debug, Clone, Serialize)]
pub struct BackendSummary {
    pub storage: &'static str,
    pub extraction: Vec<&'static str>,
    pub embedding: Vec<&'static str>,
    pub vector_backends: Vec<BackendKind>,
    pub translation: &'static str,
}

#[derive(Clone)]
pub struct AppState {
    pub ingest: Arc<IngestService>,
    pub search: Arc<SearchService>,
    pub vector_index: Arc<VectorIndexGateway>,
    pub auth: Arc<AuthPolicy>,
    pub backends: Arc<BackendSummary>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Builds every client once from configuration. No network calls are made
    /// here; remote providers are contacted on first use.
    pub fn from_config(config: AppConfig) -> Result<Self, DomainError> {
        std::fs::create_dir_all(&config.server.upload_dir).map_err(|e| {
            DomainError::internal(format!(
                "cannot create upload dir {}: {e}",
                config.server.upload_dir.display()
            ))
        })?;

        let object_store = build_object_store(&config.storage)?;
        let extraction = Arc::new(ExtractionChain::from_config(&config.extraction)?);
        let embedding = Arc::new(EmbeddingGenerator::from_config(&config.embedding));
        let vector_index = Arc::new(VectorIndexGateway::from_config(&config.vector)?);
        let translator = build_translator(&config.translation)?;

        let backends = BackendSummary {
            storage: object_store.kind(),
            extraction: extraction.names(),
            embedding: embedding.provider_names(),
            vector_backends: vector_index.kinds(),
            translation: translator.name(),
        };

        let ingest = Arc::new(IngestService::new(
            object_store,
            extraction,
            embedding,
            vector_index.clone(),
            translator,
        ));
        let search = Arc::new(SearchService::new(vector_index.clone()));

        Ok(Self {
            ingest,
            search,
            vector_index,
            auth: Arc::new(AuthPolicy::from_config(&config.auth)),
            backends: Arc::new(backends),
            config: Arc::new(config),
        })
    }

    pub fn with_ingest_service(mut self, service: Arc<IngestService>) -> Self {
        self.ingest = service;
        self
    }

    pub fn with_auth_policy(mut self, policy: AuthPolicy) -> Self {
        self.auth = Arc::new(policy);
        self
    }
}
