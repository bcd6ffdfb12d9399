//! `POST /process_hdf5`: upload a container and download one band as a COG.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::{
    extract::{Extension, Multipart},
    response::Response,
};
use cog_pipeline::JobWorkspace;
use tokio::io::AsyncWriteExt;
use tracing::{debug, error, info};

use crate::error::ApiError;
use crate::metrics;
use crate::state::AppState;

use super::file_attachment;

/// An upload stored in its job workspace.
struct Upload {
    workspace: JobWorkspace,
    path: PathBuf,
    file_name: String,
    band: Option<String>,
}

/// Read the multipart form, streaming the `file` field into a new workspace.
async fn receive_upload(scratch_dir: &Path, multipart: &mut Multipart) -> Result<Upload, ApiError> {
    let mut stored: Option<(JobWorkspace, PathBuf, String)> = None;
    let mut band = None;

    while let Some(mut field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" if stored.is_none() => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                if file_name.is_empty() {
                    return Err(ApiError::NoSelectedFile);
                }

                let workspace = JobWorkspace::create(scratch_dir)?;
                let path = workspace.upload_path(&file_name);
                let mut file = tokio::fs::File::create(&path).await?;
                let mut bytes = 0usize;
                while let Some(chunk) = field.chunk().await? {
                    bytes += chunk.len();
                    file.write_all(&chunk).await?;
                }
                file.flush().await?;

                debug!(job = %workspace.id(), path = %path.display(), bytes, "Upload stored");
                stored = Some((workspace, path, file_name));
            }
            "selected_band" => band = Some(field.text().await?),
            other => debug!(field = %other, "Ignoring form field"),
        }
    }

    let (workspace, path, file_name) = stored.ok_or(ApiError::NoFilePart)?;
    Ok(Upload {
        workspace,
        path,
        file_name,
        band,
    })
}

/// POST /process_hdf5 - Convert the selected band of an uploaded container
pub async fn process_handler(
    Extension(state): Extension<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Response, ApiError> {
    metrics::record_request();

    let result = convert_upload(&state, &mut multipart).await;
    if let Err(e) = &result {
        metrics::record_failure(e.kind());
    }
    result
}

async fn convert_upload(state: &AppState, multipart: &mut Multipart) -> Result<Response, ApiError> {
    let Upload {
        workspace,
        path,
        file_name,
        band,
    } = receive_upload(&state.scratch_dir, multipart).await?;

    let id = workspace.id().to_string();
    info!(job = %id, file = %file_name, band = ?band, "Received conversion request");
    state.tracker.start(&id, &file_name, band.as_deref()).await;

    let pipeline = state.pipeline.clone();
    let result = match tokio::task::spawn_blocking(move || {
        pipeline.process(&path, band.as_deref(), None, &workspace)
    })
    .await
    {
        Ok(result) => result,
        Err(e) => {
            error!(job = %id, error = %e, "Conversion task failed");
            state
                .tracker
                .complete(&id, false, vec![], Some(e.to_string()))
                .await;
            return Err(ApiError::Internal(e.to_string()));
        }
    };

    match result {
        Ok(output) => {
            let artifacts = std::iter::once(&output.primary)
                .chain(&output.slices)
                .filter_map(|p| p.file_name())
                .map(|n| n.to_string_lossy().into_owned())
                .collect();
            state.tracker.complete(&id, true, artifacts, None).await;
            metrics::record_conversion(output.duration_ms, output.slices.len());

            file_attachment(
                &output.primary,
                &output.primary_file_name(),
                vec![
                    ("x-job-id", id),
                    ("x-cog-slices", output.slices.len().to_string()),
                ],
            )
            .await
        }
        Err(e) => {
            error!(job = %id, error = %e, "Conversion failed");
            state
                .tracker
                .complete(&id, false, vec![], Some(e.to_string()))
                .await;
            Err(e.into())
        }
    }
}
