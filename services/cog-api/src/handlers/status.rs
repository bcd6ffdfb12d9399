use std::sync::Arc;

use axum::{extract::Extension, Json};

use crate::state::AppState;
use crate::tracker::StatusResponse;

/// GET /status - Active and recent conversions
pub async fn status_handler(Extension(state): Extension<Arc<AppState>>) -> Json<StatusResponse> {
    Json(state.tracker.get_status().await)
}
