pub mod config;
pub mod controllers;
pub mod error;
pub mod language;
pub mod models;
pub mod services;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json, Router,
};
use serde_json::json;
use std::any::Any;
use std::sync::Arc;
use tower_http::{catch_panic::CatchPanicLayer, services::ServeDir, trace::TraceLayer};

use services::wikipedia::{FetchError, WikipediaClient};

// Shared state for every request
#[derive(Clone, Debug)]
pub struct AppState {
    pub config: config::Config,
    pub wikipedia: WikipediaClient,
}

impl AppState {
    pub fn new(config: config::Config) -> Result<Arc<Self>, FetchError> {
        let wikipedia = WikipediaClient::from_config(&config.wikipedia)?;
        Ok(Arc::new(Self { config, wikipedia }))
    }
}

/// Full application router: pages, health check, JSON API and static assets.
pub fn app(state: Arc<AppState>) -> Router {
    let debug = state.config.app.debug;
    let static_dir = ServeDir::new(&state.config.assets.static_dir);

    Router::new()
        .merge(controllers::pages::routes())
        .merge(controllers::health::routes())
        .nest("/api", controllers::routes())
        .nest_service("/static", static_dir)
        .with_state(state)
        .layer(CatchPanicLayer::custom(
            move |panic: Box<dyn Any + Send + 'static>| panic_response(panic, debug),
        ))
        .layer(TraceLayer::new_for_http())
}

/// Debug mode shows the panic message; otherwise the body is the generic error.
fn panic_response(panic: Box<dyn Any + Send + 'static>, debug: bool) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    tracing::error!("Handler panicked: {}", detail);

    let body = if debug {
        json!({ "error": "Internal server error", "detail": detail })
    } else {
        json!({ "error": "Internal server error" })
    };
    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}
