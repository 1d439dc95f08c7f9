use std::path::Path;

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    http::{header::ACCEPT_LANGUAGE, HeaderMap},
    Json,
};
use serde::Serialize;
use tempfile::TempPath;
use tokio::io::AsyncWriteExt;

use crate::api::{error::ApiError, state::AppState};
use crate::application::IngestRequest;
use crate::domain::sanitize_filename;

const FILE_FIELD: &str = "file";

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub ok: bool,
    pub object: String,
    #[serde(rename = "translatedText", skip_serializing_if = "Option::is_none")]
    pub translated_text: Option<String>,
}

struct ReceivedFile {
    file: TempPath,
    filename: String,
}

pub async fn upload_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut multipart = multipart.map_err(|e| {
        tracing::debug!(error = %e, "upload is not a multipart request");
        ApiError::BadRequest("no file")
    })?;

    let received = receive_file(&mut multipart, &state.config.server.upload_dir)
        .await?
        .ok_or(ApiError::BadRequest("no file"))?;

    let request = IngestRequest::new(received.file, received.filename)
        .with_target_lang(target_language(&headers));

    let outcome = state.ingest.ingest(request).await.map_err(|e| {
        tracing::error!(error = %e, "Upload failed");
        ApiError::Internal("upload failed")
    })?;

    Ok(Json(UploadResponse {
        ok: true,
        object: outcome.object_key,
        translated_text: outcome.translated_text.filter(|t| !t.is_empty()),
    }))
}

/// Streams the `file` field into a temp file under `dir`. Other fields are
/// ignored.
async fn receive_file(
    multipart: &mut Multipart,
    dir: &Path,
) -> Result<Option<ReceivedFile>, ApiError> {
    while let Some(mut field) = multipart.next_field().await.map_err(|e| {
        tracing::debug!(error = %e, "malformed multipart body");
        ApiError::BadRequest("invalid upload")
    })? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let filename = sanitize_filename(field.file_name().unwrap_or_default());

        let temp = tempfile::Builder::new()
            .prefix("upload-")
            .tempfile_in(dir)
            .map_err(|e| {
                tracing::error!(dir = %dir.display(), error = %e, "cannot create upload temp file");
                ApiError::Internal("upload failed")
            })?;
        let (file, path) = temp.into_parts();
        let mut file = tokio::fs::File::from_std(file);

        while let Some(chunk) = field.chunk().await.map_err(|e| {
            tracing::debug!(error = %e, "upload stream interrupted");
            ApiError::BadRequest("invalid upload")
        })? {
            file.write_all(&chunk).await.map_err(|e| {
                tracing::error!(error = %e, "cannot write upload temp file");
                ApiError::Internal("upload failed")
            })?;
        }
        file.flush().await.map_err(|e| {
            tracing::error!(error = %e, "cannot flush upload temp file");
            ApiError::Internal("upload failed")
        })?;

        return Ok(Some(ReceivedFile {
            file: path,
            filename,
        }));
    }
    Ok(None)
}

/// First language tag of `Accept-Language`, without its quality weight.
pub fn target_language(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(ACCEPT_LANGUAGE)?.to_str().ok()?;
    let first = value.split(',').next()?;
    let tag = first.split(';').next()?.trim();
    if tag.is_empty() || tag == "*" {
        None
    } else {
        Some(tag.to_string())
    }
}
