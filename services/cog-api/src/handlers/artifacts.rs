//! `GET /jobs/:job_id/:file_name`: download any artifact of a finished job.

use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    response::Response,
};
use cog_pipeline::JobWorkspace;
use tracing::debug;

use crate::error::ApiError;
use crate::state::AppState;

use super::file_attachment;

pub async fn artifact_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path((job_id, file_name)): Path<(String, String)>,
) -> Result<Response, ApiError> {
    let path = JobWorkspace::open(&state.scratch_dir, &job_id)
        .and_then(|ws| ws.artifact(&file_name))
        .ok_or_else(|| ApiError::NotFound(format!("{job_id}/{file_name}")))?;

    debug!(job = %job_id, file = %file_name, "Serving artifact");
    file_attachment(&path, &file_name, vec![("x-job-id", job_id.clone())]).await
}
