pub mod ephemeris;
pub mod health;
pub mod pages;
pub mod translations;

use axum::Router;
use std::sync::Arc;

/// Routes mounted under `/api`.
pub fn routes() -> Router<Arc<crate::AppState>> {
    Router::new()
        .merge(ephemeris::routes())
        .merge(translations::routes())
}
