use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use crate::domain::{ports::TextExtractor, DomainError};

/// Remote structured-extraction service exposing `POST /extract`.
pub struct DonutExtractor {
    client: reqwest::Client,
    endpoint: String,
}

#[derive(Debug, Deserialize)]
struct ExtractResponse {
    #[serde(default)]
    text: Option<String>,
}

impl DonutExtractor {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DomainError::internal(format!("failed to build Donut client: {e}")))?;
        Ok(Self {
            client,
            endpoint: format!("{}/extract", base_url.trim_end_matches('/')),
        })
    }
}

#[async_trait]
impl TextExtractor for DonutExtractor {
    fn name(&self) -> &'static str {
        "donut"
    }

    async fn extract(&self, local_path: &Path, filename: &str) -> Result<String, DomainError> {
        let bytes = tokio::fs::read(local_path)
            .await
            .map_err(|e| DomainError::provider(format!("cannot read upload: {e}")))?;

        let form = Form::new().part("file", Part::bytes(bytes).file_name(filename.to_string()));

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|e| DomainError::provider(format!("donut request failed: {e}")))?
            .error_for_status()
            .map_err(|e| DomainError::provider(format!("donut returned error: {e}")))?;

        let body: ExtractResponse = response
            .json()
            .await
            .map_err(|e| DomainError::provider(format!("invalid donut response: {e}")))?;

        body.text
            .ok_or_else(|| DomainError::provider("donut response has no text"))
    }
}
