use axum::{extract::State, response::Html, routing::get, Router};
use std::io::ErrorKind;
use std::sync::Arc;

use crate::{error::ApiError, AppState};

pub const INDEX_TEMPLATE: &str = "index.html";

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/", get(index))
}

// GET /
pub async fn index(State(state): State<Arc<AppState>>) -> Result<Html<String>, ApiError> {
    let path = state.config.assets.templates_dir.join(INDEX_TEMPLATE);
    let page = tokio::fs::read_to_string(&path).await.map_err(|e| match e.kind() {
        ErrorKind::NotFound => ApiError::NotFound("Page not found".to_string()),
        _ => ApiError::Internal(format!("reading {}: {}", path.display(), e)),
    })?;
    Ok(Html(page))
}
