use std::path::Path;

use async_trait::async_trait;
use s3::creds::Credentials;
use s3::bucket_ops::BucketConfiguration;
use s3::{Bucket, Region};

use crate::domain::{ports::ObjectStore, DomainError};
use crate::infrastructure::config::StorageConfig;

/// S3-compatible object store (MinIO), addressed path-style.
pub struct MinioObjectStore {
    bucket: Box<Bucket>,
    bucket_name: String,
    region: Region,
    credentials: Credentials,
}

impl MinioObjectStore {
    pub fn new(config: &StorageConfig) -> Result<Self, DomainError> {
        let host = config
            .endpoint
            .as_deref()
            .ok_or_else(|| DomainError::missing_config("MINIO_ENDPOINT"))?;

        let region = Region::Custom {
            region: config.region.clone(),
            endpoint: endpoint_url(host, config.port, config.use_ssl),
        };
        let credentials = Credentials::new(
            Some(config.access_key.as_str()),
            Some(config.secret_key.as_str()),
            None,
            None,
            None,
        )
        .map_err(|e| DomainError::storage(e.to_string()))?;

        let bucket = Bucket::new(&config.bucket, region.clone(), credentials.clone())
            .map_err(|e| DomainError::storage(e.to_string()))?
            .with_path_style();

        Ok(Self {
            bucket,
            bucket_name: config.bucket.clone(),
            region,
            credentials,
        })
    }

    /// Creates the bucket if it is missing. Failures are ignored: a concurrent
    /// request may have created it, and a real outage shows up on the write.
    async fn ensure_bucket(&self) {
        match self.bucket.exists().await {
            Ok(true) => {}
            Ok(false) => {
                let created = Bucket::create_with_path_style(
                    &self.bucket_name,
                    self.region.clone(),
                    self.credentials.clone(),
                    BucketConfiguration::default(),
                )
                .await;
                if let Err(e) = created {
                    tracing::debug!(bucket = %self.bucket_name, error = %e, "bucket creation failed");
                }
            }
            Err(e) => {
                tracing::debug!(bucket = %self.bucket_name, error = %e, "bucket existence check failed");
            }
        }
    }
}

#[async_trait]
impl ObjectStore for MinioObjectStore {
    fn kind(&self) -> &'static str {
        "minio"
    }

    async fn store(&self, local_path: &Path, object_key: &str) -> Result<(), DomainError> {
        self.ensure_bucket().await;

        let content = tokio::fs::read(local_path)
            .await
            .map_err(|e| DomainError::storage(e.to_string()))?;

        let response = self
            .bucket
            .put_object(object_key, &content)
            .await
            .map_err(|e| DomainError::storage(e.to_string()))?;

        let status = response.status_code();
        if !(200..300).contains(&status) {
            return Err(DomainError::storage(format!(
                "put_object returned status {status}"
            )));
        }

        tracing::debug!(bucket = %self.bucket_name, object_key, bytes = content.len(), "object stored");
        Ok(())
    }
}

fn endpoint_url(host: &str, port: u16, use_ssl: bool) -> String {
    if host.contains("://") {
        return host.trim_end_matches('/').to_string();
    }
    let scheme = if use_ssl { "https" } else { "http" };
    format!("{scheme}://{host}:{port}")
}
