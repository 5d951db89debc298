use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::services::wikipedia::FetchError;

const INTERNAL_MESSAGE: &str = "Internal server error";

/// Errors surfaced by the HTTP handlers. Every variant renders as
/// `{"error": "..."}`; upstream and internal causes are logged, never sent.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error(transparent)]
    Upstream(#[from] FetchError),
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Upstream(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn public_message(&self) -> String {
        match self {
            ApiError::Validation(msg) | ApiError::NotFound(msg) => msg.clone(),
            ApiError::Upstream(_) | ApiError::Internal(_) => INTERNAL_MESSAGE.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Upstream(e) => tracing::error!("Upstream request failed: {}", e),
            ApiError::Internal(e) => tracing::error!("Internal error: {}", e),
            _ => {}
        }

        (self.status(), Json(json!({ "error": self.public_message() }))).into_response()
    }
}
