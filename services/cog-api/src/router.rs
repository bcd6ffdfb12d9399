//! HTTP router.
//!
//! - `POST /process_hdf5` - Convert one band of an uploaded container
//! - `GET /jobs/:job_id/:file_name` - Download an artifact of a job
//! - `GET /thank_you` - Static confirmation fragment
//! - `GET /status` - Active and recent conversions
//! - `GET /health` - Health check
//! - `GET /metrics` - Prometheus metrics
//! - anything else - static client from `static_dir`

use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, Extension},
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::handlers;
use crate::state::AppState;

/// Build the HTTP router.
pub fn build_router(state: Arc<AppState>) -> Router {
    let static_files = ServeDir::new(&state.static_dir);
    let body_limit = state.max_upload_bytes;

    Router::new()
        .route("/process_hdf5", post(handlers::process::process_handler))
        .route(
            "/jobs/:job_id/:file_name",
            get(handlers::artifacts::artifact_handler),
        )
        .route("/thank_you", get(handlers::pages::thank_you_handler))
        .route("/status", get(handlers::status::status_handler))
        .route("/health", get(handlers::health::health_handler))
        .route("/metrics", get(handlers::health::metrics_handler))
        .fallback_service(static_files)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
