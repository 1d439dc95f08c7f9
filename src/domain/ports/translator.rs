use async_trait::async_trait;

use crate::domain::errors::DomainError;

#[async_trait]
pub trait Translator: Send + Sync {
    fn name(&self) -> &'static str;

    /// Returns `text` in `target_lang`. Unconfigured translators return the
    /// input unchanged.
    async fn translate(&self, text: &str, target_lang: &str) -> Result<String, DomainError>;
}
