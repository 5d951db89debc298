use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use serde_json::Value;
use std::io::ErrorKind;
use std::sync::Arc;

use crate::{error::ApiError, language::Language, AppState};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/translations/{lang}", get(get_translations))
}

// GET /api/translations/{lang}
pub async fn get_translations(
    State(state): State<Arc<AppState>>,
    Path(lang): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let language: Language = lang
        .parse()
        .map_err(|_| ApiError::Validation("Unsupported language".to_string()))?;

    let path = state
        .config
        .assets
        .translations_dir
        .join(format!("{}.json", language.code()));

    let raw = tokio::fs::read_to_string(&path).await.map_err(|e| match e.kind() {
        ErrorKind::NotFound => ApiError::NotFound("Translations not found".to_string()),
        _ => ApiError::Internal(format!("reading {}: {}", path.display(), e)),
    })?;

    let translations = serde_json::from_str(&raw)
        .map_err(|e| ApiError::Internal(format!("parsing {}: {}", path.display(), e)))?;

    Ok(Json(translations))
}
