//! ephemeris.rs
//!
//! On-this-day endpoints.
//!
//! - `GET /api/ephemeris/today?lang=` returns one random event of the current
//!   day in its light form.
//! - `POST /api/ephemeris/details` looks the event up again by year and text
//!   and returns its expanded form.
//!
//! The details lookup re-fetches the whole day instead of reusing the event
//! handed out by `today`, so both calls can disagree if the feed changes in
//! between (for example across midnight).

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    routing::{get, post},
    Json, Router,
};
use chrono::{Datelike, Local};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

use crate::{
    error::ApiError,
    language::Language,
    models::{Event, EventDetail, EventSummary, Year},
    AppState,
};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ephemeris/today", get(get_today_ephemeris))
        .route("/ephemeris/details", post(get_ephemeris_details))
}

fn today() -> (u32, u32) {
    let now = Local::now();
    (now.month(), now.day())
}

/// Resolves the optional `lang` value to a supported UI language.
fn resolve_language(state: &AppState, lang: Option<&str>) -> Result<Language, ApiError> {
    match lang {
        None => Ok(state.config.app.default_language),
        Some(code) => code
            .parse()
            .map_err(|_| ApiError::Validation("Unsupported language".to_string())),
    }
}

// GET /api/ephemeris/today
#[derive(Debug, Deserialize)]
pub struct TodayQuery {
    pub lang: Option<String>,
}

pub async fn get_today_ephemeris(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TodayQuery>,
) -> Result<Json<EventSummary>, ApiError> {
    let language = resolve_language(&state, params.lang.as_deref())?;
    let (month, day) = today();

    let event = state
        .wikipedia
        .get_random_event(month, day, language.source())
        .await?
        .ok_or_else(|| ApiError::NotFound("No events found for today".to_string()))?;

    Ok(Json(EventSummary::from(&event)))
}

// POST /api/ephemeris/details
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DetailsRequest {
    pub year: Option<Value>,
    pub text: Option<Value>,
    pub lang: Option<String>,
}

/// JSON falsiness: null, false, zero, and empty strings, arrays or objects.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Only integers and strings can ever equal a feed year. Integral floats
/// (`1492.0`) count as integers.
fn requested_year(value: &Value) -> Option<Year> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64))
            .map(Year::Number),
        Value::String(s) => Some(Year::Text(s.clone())),
        _ => None,
    }
}

fn find_event(events: Vec<Event>, year: &Year, text: &str) -> Option<Event> {
    events
        .into_iter()
        .find(|event| event.year.as_ref() == Some(year) && event.text.as_deref() == Some(text))
}

pub async fn get_ephemeris_details(
    State(state): State<Arc<AppState>>,
    body: Result<Json<DetailsRequest>, JsonRejection>,
) -> Result<Json<EventDetail>, ApiError> {
    let Json(req) = body.map_err(|rejection| {
        tracing::debug!("Rejected details body: {}", rejection);
        ApiError::Validation("Invalid JSON body".to_string())
    })?;

    let (year, text) = match (&req.year, &req.text) {
        (Some(year), Some(text)) if is_truthy(year) && is_truthy(text) => (year, text),
        _ => return Err(ApiError::Validation("Missing required fields".to_string())),
    };

    let language = resolve_language(&state, req.lang.as_deref())?;
    let (month, day) = today();

    let events = state
        .wikipedia
        .get_events(month, day, language.source())
        .await?;

    let not_found = || ApiError::NotFound("Event not found".to_string());
    let year = requested_year(year).ok_or_else(not_found)?;
    let text = text.as_str().ok_or_else(not_found)?;
    let event = find_event(events, &year, text).ok_or_else(not_found)?;

    Ok(Json(EventDetail::from_event(&event)))
}
