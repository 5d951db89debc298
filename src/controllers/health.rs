use axum::{routing::get, Json, Router};
use chrono::{Local, SecondsFormat};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(health_check))
}

pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "timestamp": Local::now().to_rfc3339_opts(SecondsFormat::Micros, false),
    }))
}
