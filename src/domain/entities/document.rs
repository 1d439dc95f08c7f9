use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;
use serde::Serialize;

use super::Embedding;

pub const OBJECT_KEY_PREFIX: &str = "blueprints";
const FALLBACK_FILENAME: &str = "upload";

static LAST_KEY_MILLIS: AtomicI64 = AtomicI64::new(0);

/// One file moving through the ingestion pipeline.
///
/// Lives for a single request. Fields are filled in stage by stage; nothing
/// here is persisted, the object store and the vector index keep their own
/// copies.
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    pub local_path: PathBuf,
    pub original_filename: String,
    pub object_key: String,
    pub extracted_text: Option<String>,
    pub embedding: Option<Embedding>,
    pub translated_text: Option<String>,
}

impl UploadedDocument {
    pub fn new(local_path: impl Into<PathBuf>, original_filename: impl Into<String>) -> Self {
        let original_filename = original_filename.into();
        let object_key = object_key_for(&original_filename);
        Self {
            local_path: local_path.into(),
            original_filename,
            object_key,
            extracted_text: None,
            embedding: None,
            translated_text: None,
        }
    }

    pub fn local_path(&self) -> &Path {
        &self.local_path
    }

    /// Text handed to the indexer. Falls back to the placeholder so indexing
    /// never sees an empty document.
    pub fn index_text(&self) -> String {
        match self.extracted_text.as_deref() {
            Some(text) if !text.trim().is_empty() => text.to_string(),
            _ => placeholder_text(&self.original_filename),
        }
    }
}

/// Builds `blueprints/<unix-millis>_<filename>`.
///
/// The timestamp is strictly increasing within the process, so two uploads of
/// the same file in the same millisecond still get distinct keys.
pub fn object_key_for(filename: &str) -> String {
    format!(
        "{}/{}_{}",
        OBJECT_KEY_PREFIX,
        next_key_millis(),
        sanitize_filename(filename)
    )
}

fn next_key_millis() -> i64 {
    let now = Utc::now().timestamp_millis();
    let mut last = LAST_KEY_MILLIS.load(Ordering::Relaxed);
    loop {
        let next = now.max(last + 1);
        match LAST_KEY_MILLIS.compare_exchange_weak(last, next, Ordering::AcqRel, Ordering::Relaxed)
        {
            Ok(_) => return next,
            Err(current) => last = current,
        }
    }
}

/// Keeps only the final path component of a client-supplied filename.
pub fn sanitize_filename(filename: &str) -> String {
    let base = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();

    if base.is_empty() || base == "." || base == ".." {
        FALLBACK_FILENAME.to_string()
    } else {
        base.to_string()
    }
}

/// Terminal value of the extraction chain.
pub fn placeholder_text(filename: &str) -> String {
    format!("Indexed file {}", filename)
}

/// Response of one successful ingestion.
#[derive(Debug, Clone, Serialize)]
pub struct IngestOutcome {
    pub object_key: String,
    pub translated_text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timestamp_of(key: &str) -> i64 {
        let rest = key.strip_prefix("blueprints/").unwrap();
        let (millis, _) = rest.split_once('_').unwrap();
        millis.parse().unwrap()
    }

    #[test]
    fn test_object_key_format() {
        let key = object_key_for("plan.pdf");
        assert!(key.starts_with("blueprints/"));
        assert!(key.ends_with("_plan.pdf"));
        assert!(timestamp_of(&key) > 0);
    }

    #[test]
    fn test_object_keys_unique_for_same_filename() {
        let a = object_key_for("same.png");
        let b = object_key_for("same.png");
        assert_ne!(a, b);
        assert!(timestamp_of(&b) > timestamp_of(&a));
    }

    #[test]
    fn test_sanitize_filename_strips_directories() {
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("C:\\plans\\level1.pdf"), "level1.pdf");
        assert_eq!(sanitize_filename("  "), "upload");
        assert_eq!(sanitize_filename(".."), "upload");
    }

    #[test]
    fn test_index_text_falls_back_to_placeholder() {
        let mut doc = UploadedDocument::new("/tmp/x", "site.jpg");
        assert_eq!(doc.index_text(), "Indexed file site.jpg");

        doc.extracted_text = Some("   ".into());
        assert_eq!(doc.index_text(), "Indexed file site.jpg");

        doc.extracted_text = Some("BEAM SCHEDULE".into());
        assert_eq!(doc.index_text(), "BEAM SCHEDULE");
    }
}
