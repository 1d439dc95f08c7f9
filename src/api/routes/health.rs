use axum::{extract::State, Json};
use serde::Serialize;

use crate::api::state::{AppState, BackendSummary};

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[derive(Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    #[serde(flatten)]
    pub backends: BackendSummary,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
        version: env!("CARGO_PKG_VERSION").into(),
    })
}

/// Every chain ends in a local fallback, so the service is ready as soon as
/// it is wired; this reports which providers were resolved.
pub async fn readiness_check(State(state): State<AppState>) -> Json<ReadinessResponse> {
    Json(ReadinessResponse {
        status: "ready".into(),
        backends: state.backends.as_ref().clone(),
    })
}
