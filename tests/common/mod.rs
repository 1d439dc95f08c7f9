#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, Response},
    Router,
};
use buildbrain::api::{create_router, AppState};
use buildbrain::infrastructure::AppConfig;
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

pub const BOUNDARY: &str = "buildbrain-test-boundary";

/// Config that touches no remote provider: local object store, no OCR
/// binary, in-memory index only.
pub struct TestEnv {
    pub dir: TempDir,
    pub config: AppConfig,
}

impl TestEnv {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut config = AppConfig::default();
        config.server.upload_dir = dir.path().join("uploads");
        config.storage.local_dir = dir.path().join("objects");
        config.extraction.tesseract_cmd = dir
            .path()
            .join("no-such-tesseract")
            .to_string_lossy()
            .into_owned();
        Self { dir, config }
    }

    pub fn state(&self) -> AppState {
        AppState::from_config(self.config.clone()).expect("state should build from local config")
    }

    pub fn uploads_left(&self) -> usize {
        std::fs::read_dir(&self.config.server.upload_dir)
            .expect("upload dir exists")
            .count()
    }
}

pub async fn send(app: Router, request: Request<Body>) -> (u16, Value) {
    let response: Response<Body> = app.oneshot(request).await.expect("router should respond");
    let status = response.status().as_u16();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("response body must be readable")
        .to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("response must be valid JSON")
    };
    (status, value)
}

pub fn multipart_body(field: &str, filename: &str, contents: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(contents);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub fn upload_request(body: Vec<u8>) -> axum::http::request::Builder {
    Request::builder()
        .method("POST")
        .uri("/upload")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .header("content-length", body.len())
}

pub fn app(state: AppState) -> Router {
    create_router(state)
}
