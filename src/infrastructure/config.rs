use std::path::PathBuf;

use ::config::builder::DefaultState;
use ::config::{Config, ConfigBuilder, File, FileFormat};
use serde::Deserialize;

use crate::domain::{BackendKind, EMBEDDING_DIMENSION};

pub const CONFIG_PATH_ENV: &str = "BUILDBRAIN_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "config/buildbrain.yaml";

/// Flat environment names and the config keys they override.
const ENV_OVERRIDES: &[(&str, &str)] = &[
    ("SERVER_HOST", "server.host"),
    ("UPLOAD_DIR", "server.upload_dir"),
    ("MAX_UPLOAD_BYTES", "server.max_upload_bytes"),
    ("MINIO_ENDPOINT", "storage.endpoint"),
    ("MINIO_PORT", "storage.port"),
    ("MINIO_USE_SSL", "storage.use_ssl"),
    ("MINIO_ROOT_USER", "storage.access_key"),
    ("MINIO_ROOT_PASSWORD", "storage.secret_key"),
    ("MINIO_BUCKET", "storage.bucket"),
    ("MINIO_REGION", "storage.region"),
    ("LOCAL_STORE_DIR", "storage.local_dir"),
    ("DONUT_URL", "extraction.donut_url"),
    ("TESSERACT_CMD", "extraction.tesseract_cmd"),
    ("TESSERACT_TIMEOUT_SECONDS", "extraction.tesseract_timeout_seconds"),
    ("OPENAI_API_KEY", "embedding.openai_api_key"),
    ("OPENAI_BASE_URL", "embedding.openai_base_url"),
    ("PINECONE_API_KEY", "vector.pinecone_api_key"),
    ("PINECONE_ENV", "vector.pinecone_env"),
    ("PINECONE_INDEX", "vector.pinecone_index"),
    ("PINECONE_BASE_URL", "vector.pinecone_base_url"),
    ("QDRANT_URL", "vector.qdrant_url"),
    ("QDRANT_COLLECTION", "vector.qdrant_collection"),
    ("GOOGLE_API_KEY", "translation.google_api_key"),
    ("GOOGLE_TRANSLATE_URL", "translation.endpoint"),
    ("DISABLE_AUTH", "auth.disabled"),
];

/// Comma-separated environment lists.
const ENV_LIST_OVERRIDES: &[(&str, &str)] = &[
    ("CORS_ALLOWED_ORIGINS", "server.cors_allowed_origins"),
    ("AUTH_TOKENS", "auth.tokens"),
];

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] ::config::ConfigError),
}

/// Process-wide configuration.
///
/// Resolution order: built-in defaults, then the optional YAML file, then
/// environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub extraction: ExtractionConfig,
    pub embedding: EmbeddingConfig,
    pub vector: VectorConfig,
    pub translation: TranslationConfig,
    pub auth: AuthConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub upload_dir: PathBuf,
    pub max_upload_bytes: usize,
    pub cors_allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 4000,
            upload_dir: PathBuf::from("uploads"),
            max_upload_bytes: 50 * 1024 * 1024,
            cors_allowed_origins: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// MinIO / S3 host. Unset selects the on-disk development store.
    pub endpoint: Option<String>,
    pub port: u16,
    pub use_ssl: bool,
    pub access_key: String,
    pub secret_key: String,
    pub bucket: String,
    pub region: String,
    pub local_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            port: 9000,
            use_ssl: false,
            access_key: "minio".to_string(),
            secret_key: "minio123".to_string(),
            bucket: "buildbrain".to_string(),
            region: "us-east-1".to_string(),
            local_dir: PathBuf::from("data/objects"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    pub donut_url: Option<String>,
    pub donut_timeout_seconds: u64,
    pub tesseract_cmd: String,
    pub tesseract_lang: String,
    pub tesseract_timeout_seconds: u64,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            donut_url: None,
            donut_timeout_seconds: 120,
            tesseract_cmd: "tesseract".to_string(),
            tesseract_lang: "eng".to_string(),
            tesseract_timeout_seconds: 120,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    pub openai_api_key: Option<String>,
    /// Overrides `https://api.openai.com/v1`.
    pub openai_base_url: Option<String>,
    pub model: String,
    pub dimension: usize,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            openai_base_url: None,
            model: "text-embedding-3-small".to_string(),
            dimension: EMBEDDING_DIMENSION,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct VectorConfig {
    pub pinecone_api_key: Option<String>,
    pub pinecone_env: Option<String>,
    pub pinecone_index: String,
    /// Overrides `https://<index>-<env>.svc.pinecone.io`.
    pub pinecone_base_url: Option<String>,
    pub qdrant_url: Option<String>,
    pub qdrant_collection: String,
}

impl Default for VectorConfig {
    fn default() -> Self {
        Self {
            pinecone_api_key: None,
            pinecone_env: None,
            pinecone_index: "buildbrain".to_string(),
            pinecone_base_url: None,
            qdrant_url: None,
            qdrant_collection: "buildbrain".to_string(),
        }
    }
}

impl VectorConfig {
    /// Backends to try, in precedence order. The in-memory stub is always last.
    pub fn backend_kinds(&self) -> Vec<BackendKind> {
        let mut kinds = Vec::with_capacity(3);
        if self.pinecone_api_key.is_some() && self.pinecone_env.is_some() {
            kinds.push(BackendKind::Pinecone);
        }
        if self.qdrant_url.is_some() {
            kinds.push(BackendKind::Qdrant);
        }
        kinds.push(BackendKind::Memory);
        kinds
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TranslationConfig {
    pub google_api_key: Option<String>,
    pub endpoint: String,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            google_api_key: None,
            endpoint: "https://translation.googleapis.com/language/translate/v2".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub disabled: bool,
    pub tokens: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    #[serde(alias = "text")]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub format: LogFormat,
}

impl AppConfig {
    /// Loads the YAML file (if any) and applies process environment overrides.
    ///
    /// A path given in `BUILDBRAIN_CONFIG` must exist; the default path is
    /// optional.
    pub fn load() -> Result<Self, ConfigError> {
        let file = match std::env::var(CONFIG_PATH_ENV)
            .ok()
            .filter(|p| !p.trim().is_empty())
        {
            Some(path) => File::from(PathBuf::from(path))
                .format(FileFormat::Yaml)
                .required(true),
            None => File::from(PathBuf::from(DEFAULT_CONFIG_PATH))
                .format(FileFormat::Yaml)
                .required(false),
        };

        Self::layered(
            Config::builder().add_source(file),
            |key| std::env::var(key).ok(),
        )
    }

    pub fn from_yaml_str(raw: &str) -> Result<Self, ConfigError> {
        Self::from_sources(Some(raw), |_| None)
    }

    /// Builds the configuration from optional YAML text and an environment
    /// read through `lookup`.
    pub fn from_sources<F>(yaml: Option<&str>, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = Config::builder();
        if let Some(raw) = yaml {
            builder = builder.add_source(File::from_str(raw, FileFormat::Yaml));
        }
        Self::layered(builder, lookup)
    }

    /// Environment values win over the file; struct defaults fill the rest.
    /// Empty values are treated as unset.
    fn layered<F>(builder: ConfigBuilder<DefaultState>, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let mut builder = builder
            .set_override_option("server.port", get("PORT").or_else(|| get("SERVER_PORT")))?
            .set_override_option(
                "logging.format",
                get("LOG_FORMAT").map(|v| v.trim().to_ascii_lowercase()),
            )?;

        for &(env, key) in ENV_OVERRIDES {
            builder = builder.set_override_option(key, get(env))?;
        }
        for &(env, key) in ENV_LIST_OVERRIDES {
            builder = builder.set_override_option(key, get(env).map(|v| split_list(&v)))?;
        }

        Ok(builder.build()?.try_deserialize()?)
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
