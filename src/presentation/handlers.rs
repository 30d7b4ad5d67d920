// HTTP request handlers
use crate::application::window::WindowKind;
use crate::presentation::app_state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

#[derive(Deserialize)]
pub struct WindowQuery {
    pub window: Option<WindowKind>,
    pub date: Option<NaiveDate>,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Reload the observation window from the metering feeds
pub async fn refresh(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.dashboard_service.refresh().await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => {
            tracing::error!("window refresh failed: {e:#}");
            error_response(StatusCode::BAD_GATEWAY, &e.to_string())
        }
    }
}

/// Windowed readings plus totals and daily averages
pub async fn get_consumption(
    Query(query): Query<WindowQuery>,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let kind = query.window.unwrap_or(WindowKind::Trailing7);
    let reference = query.date.unwrap_or_else(today);
    Json(state.dashboard_service.get_consumption(kind, reference))
}

/// Monthly bill estimate from the configured tariff rates
pub async fn get_bill(
    Query(query): Query<WindowQuery>,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let reference = query.date.unwrap_or_else(today);
    match state.dashboard_service.get_bill_estimate(reference) {
        Ok(bill) => Json(bill).into_response(),
        Err(e) => error_response(StatusCode::UNPROCESSABLE_ENTITY, &e.to_string()),
    }
}

pub async fn list_alerts(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.dashboard_service.get_alerts())
}

/// Marking an unknown alert id is a no-op, so retries always succeed
pub async fn mark_alert_read(
    Path(id): Path<i64>,
    State(state): State<Arc<AppState>>,
) -> StatusCode {
    state.dashboard_service.mark_alert_read(id);
    StatusCode::NO_CONTENT
}

pub async fn list_recommendations(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.dashboard_service.get_recommendations())
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

fn error_response(status: StatusCode, message: &str) -> axum::response::Response {
    (status, Json(json!({ "error": message }))).into_response()
}
