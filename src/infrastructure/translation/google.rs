use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{ports::Translator, DomainError};

/// Google Cloud Translation v2.
pub struct GoogleTranslator {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
}

#[derive(Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    target: &'a str,
}

#[derive(Debug, Default, Deserialize)]
struct TranslateResponse {
    #[serde(default)]
    data: Option<TranslateData>,
}

#[derive(Debug, Default, Deserialize)]
struct TranslateData {
    #[serde(default)]
    translations: Vec<Translation>,
}

#[derive(Debug, Deserialize)]
struct Translation {
    #[serde(rename = "translatedText")]
    translated_text: Option<String>,
}

impl GoogleTranslator {
    pub fn new(api_key: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl Translator for GoogleTranslator {
    fn name(&self) -> &'static str {
        "google"
    }

    async fn translate(&self, text: &str, target_lang: &str) -> Result<String, DomainError> {
        let response: TranslateResponse = self
            .client
            .post(&self.endpoint)
            .query(&[("key", self.api_key.as_str())])
            .json(&TranslateRequest {
                q: text,
                target: target_lang,
            })
            .send()
            .await
            .map_err(|e| DomainError::provider(format!("translate request failed: {e}")))?
            .error_for_status()
            .map_err(|e| DomainError::provider(format!("translate rejected: {e}")))?
            .json()
            .await
            .map_err(|e| DomainError::provider(format!("invalid translate response: {e}")))?;

        // A well-formed response without a translation keeps the source text.
        Ok(response
            .data
            .and_then(|d| d.translations.into_iter().next())
            .and_then(|t| t.translated_text)
            .unwrap_or_else(|| text.to_string()))
    }
}
