use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::api::{error::ApiError, state::AppState};
use crate::domain::{DomainError, SearchResult};

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub q: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub results: Vec<SearchResult>,
}

pub async fn search_handler(
    State(state): State<AppState>,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<SearchResponse>, ApiError> {
    let query = payload
        .ok()
        .and_then(|Json(request)| request.q)
        .filter(|q| !q.is_empty())
        .ok_or(ApiError::BadRequest("missing query"))?;

    match state.search.search(&query).await {
        Ok(results) => Ok(Json(SearchResponse { results })),
        Err(DomainError::Validation(_)) => Err(ApiError::BadRequest("missing query")),
        Err(e) => {
            tracing::error!(error = %e, "Search failed");
            Err(ApiError::Internal("search failed"))
        }
    }
}
