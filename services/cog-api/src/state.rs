//! Shared application state.

use std::path::PathBuf;

use cog_pipeline::Pipeline;
use metrics_exporter_prometheus::PrometheusHandle;

use crate::tracker::ConversionTracker;

/// Default request body limit: 1 GiB.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 1024 * 1024 * 1024;

/// Shared state for the HTTP server.
pub struct AppState {
    pub pipeline: Pipeline,
    /// Root of the per-job workspaces
    pub scratch_dir: PathBuf,
    /// Directory served at `/`
    pub static_dir: PathBuf,
    pub max_upload_bytes: usize,
    pub tracker: ConversionTracker,
    /// Absent when no recorder is installed (tests)
    pub prometheus: Option<PrometheusHandle>,
}

impl AppState {
    pub fn new(pipeline: Pipeline, scratch_dir: PathBuf, static_dir: PathBuf) -> Self {
        Self {
            pipeline,
            scratch_dir,
            static_dir,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            tracker: ConversionTracker::new(),
            prometheus: None,
        }
    }

    pub fn with_max_upload_bytes(mut self, bytes: usize) -> Self {
        self.max_upload_bytes = bytes;
        self
    }

    pub fn with_prometheus(mut self, handle: PrometheusHandle) -> Self {
        self.prometheus = Some(handle);
        self
    }
}
