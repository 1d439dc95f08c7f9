use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;

use crate::domain::{ports::TextExtractor, DomainError};

/// Local OCR through the `tesseract` command line tool.
pub struct TesseractExtractor {
    command: String,
    lang: String,
    timeout: Duration,
}

impl TesseractExtractor {
    pub fn new(command: impl Into<String>, lang: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            lang: lang.into(),
            timeout: Duration::from_secs(120),
        }
    }

    /// The process is killed once `timeout` elapses.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl TextExtractor for TesseractExtractor {
    fn name(&self) -> &'static str {
        "tesseract"
    }

    async fn extract(&self, local_path: &Path, _filename: &str) -> Result<String, DomainError> {
        // LSTM engine, automatic page segmentation.
        let run = Command::new(&self.command)
            .arg(local_path)
            .arg("stdout")
            .args(["-l", self.lang.as_str(), "--oem", "1", "--psm", "3"])
            .kill_on_drop(true)
            .output();

        let output = tokio::time::timeout(self.timeout, run)
            .await
            .map_err(|_| {
                DomainError::provider(format!("{} timed out after {:?}", self.command, self.timeout))
            })?
            .map_err(|e| DomainError::provider(format!("cannot run {}: {e}", self.command)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(DomainError::provider(format!(
                "tesseract exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
