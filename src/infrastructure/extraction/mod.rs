mod donut;
mod tesseract;

use std::path::Path;
use std::sync::Arc;

use crate::domain::{placeholder_text, ports::TextExtractor, DomainError};
use crate::infrastructure::config::ExtractionConfig;

pub use donut::DonutExtractor;
pub use tesseract::TesseractExtractor;

/// Ordered extraction providers ending in a guaranteed placeholder.
pub struct ExtractionChain {
    extractors: Vec<Arc<dyn TextExtractor>>,
}

impl ExtractionChain {
    pub fn new(extractors: Vec<Arc<dyn TextExtractor>>) -> Self {
        Self { extractors }
    }

    pub fn from_config(config: &ExtractionConfig) -> Result<Self, DomainError> {
        let mut extractors: Vec<Arc<dyn TextExtractor>> = Vec::with_capacity(2);
        if let Some(url) = &config.donut_url {
            extractors.push(Arc::new(DonutExtractor::new(
                url,
                std::time::Duration::from_secs(config.donut_timeout_seconds),
            )?));
        }
        extractors.push(Arc::new(
            TesseractExtractor::new(&config.tesseract_cmd, &config.tesseract_lang)
                .with_timeout(std::time::Duration::from_secs(config.tesseract_timeout_seconds)),
        ));
        Ok(Self::new(extractors))
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.extractors.iter().map(|e| e.name()).collect()
    }

    /// Returns the first non-empty text any provider produces, or the
    /// placeholder for `filename`. Never fails.
    pub async fn extract(&self, local_path: &Path, filename: &str) -> String {
        for extractor in &self.extractors {
            match extractor.extract(local_path, filename).await {
                Ok(text) if !text.trim().is_empty() => {
                    tracing::debug!(provider = extractor.name(), chars = text.len(), "text extracted");
                    return text;
                }
                Ok(_) => {
                    tracing::warn!(provider = extractor.name(), filename, "extraction returned no text");
                }
                Err(e) => {
                    tracing::warn!(provider = extractor.name(), filename, error = %e, "extraction failed, falling back");
                }
            }
        }
        placeholder_text(filename)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Fixed {
        result: Result<&'static str, &'static str>,
        calls: AtomicUsize,
    }

    impl Fixed {
        fn ok(text: &'static str) -> Arc<Self> {
            Arc::new(Self {
                result: Ok(text),
                calls: AtomicUsize::new(0),
            })
        }

        fn err(msg: &'static str) -> Arc<Self> {
            Arc::new(Self {
                result: Err(msg),
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl TextExtractor for Fixed {
        fn name(&self) -> &'static str {
            "fixed"
        }

        async fn extract(&self, _: &Path, _: &str) -> Result<String, DomainError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.result
                .map(String::from)
                .map_err(DomainError::provider)
        }
    }

    #[tokio::test]
    async fn test_first_success_wins() {
        let first = Fixed::ok("from donut");
        let second = Fixed::ok("from tesseract");
        let extractors: Vec<Arc<dyn TextExtractor>> = vec![first.clone(), second.clone()];
        let chain = ExtractionChain::new(extractors);

        let text = chain.extract(Path::new("/tmp/a"), "a.png").await;

        assert_eq!(text, "from donut");
        assert_eq!(second.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_failure_and_empty_fall_through() {
        let extractors: Vec<Arc<dyn TextExtractor>> = vec![
            Fixed::err("timeout"),
            Fixed::ok("  \n"),
            Fixed::ok("GRID LINE A"),
        ];
        let chain = ExtractionChain::new(extractors);

        assert_eq!(chain.extract(Path::new("/tmp/a"), "a.png").await, "GRID LINE A");
    }

    #[tokio::test]
    async fn test_exhausted_chain_returns_placeholder() {
        let extractors: Vec<Arc<dyn TextExtractor>> = vec![Fixed::err("down"), Fixed::ok("")];
        let chain = ExtractionChain::new(extractors);
        assert_eq!(
            chain.extract(Path::new("/tmp/a"), "elevations.pdf").await,
            "Indexed file elevations.pdf"
        );

        let empty = ExtractionChain::new(Vec::new());
        assert_eq!(empty.extract(Path::new("/tmp/a"), "x").await, "Indexed file x");
    }

    #[test]
    fn test_from_config_orders_donut_first() {
        let config = ExtractionConfig {
            donut_url: Some("http://donut:8000".into()),
            ..Default::default()
        };
        let chain = ExtractionChain::from_config(&config).unwrap();
        assert_eq!(chain.names(), vec!["donut", "tesseract"]);

        let local_only = ExtractionChain::from_config(&ExtractionConfig::default()).unwrap();
        assert_eq!(local_only.names(), vec!["tesseract"]);
    }
}
