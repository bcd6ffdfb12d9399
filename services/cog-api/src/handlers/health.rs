//! Health and metrics handlers.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Serialize;

use crate::state::AppState;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}

/// GET /health - Health check
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        service: "cog-api".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /metrics - Prometheus metrics
pub async fn metrics_handler(Extension(state): Extension<Arc<AppState>>) -> impl IntoResponse {
    let body = state
        .prometheus
        .as_ref()
        .map(|handle| handle.render())
        .unwrap_or_default();

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        body,
    )
}
