mod google;

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{ports::Translator, DomainError};
use crate::infrastructure::config::TranslationConfig;

pub use google::GoogleTranslator;

/// Used when no translation provider is configured: returns text unchanged.
#[derive(Debug, Default, Clone, Copy)]
pub struct PassthroughTranslator;

#[async_trait]
impl Translator for PassthroughTranslator {
    fn name(&self) -> &'static str {
        "passthrough"
    }

    async fn translate(&self, text: &str, _target_lang: &str) -> Result<String, DomainError> {
        Ok(text.to_string())
    }
}

pub fn build_translator(config: &TranslationConfig) -> Result<Arc<dyn Translator>, DomainError> {
    match &config.google_api_key {
        Some(key) => Ok(Arc::new(GoogleTranslator::new(key, &config.endpoint))),
        None => Ok(Arc::new(PassthroughTranslator)),
    }
}
