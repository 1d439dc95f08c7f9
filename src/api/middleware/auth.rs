use std::collections::HashSet;

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::api::{error::ApiError, state::AppState};
use crate::infrastructure::config::AuthConfig;

/// Bearer-token gate standing in for the identity provider. With auth
/// disabled or no tokens configured, every request passes.
#[derive(Debug, Clone, Default)]
pub struct AuthPolicy {
    disabled: bool,
    tokens: HashSet<String>,
}

impl AuthPolicy {
    pub fn from_config(config: &AuthConfig) -> Self {
        Self {
            disabled: config.disabled,
            tokens: config.tokens.iter().cloned().collect(),
        }
    }

    pub fn with_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            disabled: false,
            tokens: tokens.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.disabled || self.tokens.is_empty()
    }

    pub fn allows(&self, authorization: Option<&str>) -> bool {
        if self.is_open() {
            return true;
        }
        authorization
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .is_some_and(|token| self.tokens.contains(token))
    }
}

pub async fn require_auth(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let allowed = state.auth.allows(
        request
            .headers()
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok()),
    );

    if !allowed {
        tracing::warn!(uri = %request.uri(), "rejected unauthenticated request");
        return Err(ApiError::Unauthorized);
    }

    Ok(next.run(request).await)
}
