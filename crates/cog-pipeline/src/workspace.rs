//! Per-job scratch directories.
//!
//! Every conversion gets `<scratch_dir>/<job-id>/`, and all of its
//! intermediate rasters and COG artifacts are named inside it. Two jobs for
//! the same band therefore never touch the same files. Nothing here deletes
//! old jobs.

use std::path::{Path, PathBuf};

use tracing::debug;
use uuid::Uuid;

use crate::error::{PipelineError, Result};

/// Scratch directory of a single job.
#[derive(Debug, Clone)]
pub struct JobWorkspace {
    id: String,
    dir: PathBuf,
}

impl JobWorkspace {
    /// Create a workspace with a fresh random id under `scratch_dir`.
    pub fn create<P: AsRef<Path>>(scratch_dir: P) -> Result<Self> {
        Self::create_with_id(scratch_dir, &Uuid::new_v4().to_string())
    }

    /// Create (or reuse) the workspace for a caller-chosen id.
    pub fn create_with_id<P: AsRef<Path>>(scratch_dir: P, id: &str) -> Result<Self> {
        if !is_safe_file_name(id) {
            return Err(PipelineError::InvalidJobId(id.to_string()));
        }
        let dir = scratch_dir.as_ref().join(id);
        std::fs::create_dir_all(&dir)?;
        debug!(job = %id, dir = %dir.display(), "Job workspace ready");

        Ok(Self {
            id: id.to_string(),
            dir,
        })
    }

    /// Look up an existing workspace; `None` if the id is unsafe or unknown.
    pub fn open<P: AsRef<Path>>(scratch_dir: P, id: &str) -> Option<Self> {
        if !is_safe_file_name(id) {
            return None;
        }
        let dir = scratch_dir.as_ref().join(id);
        dir.is_dir().then(|| Self {
            id: id.to_string(),
            dir,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of an intermediate raster, `<stem>.tif`.
    pub fn raster_path(&self, stem: &str) -> PathBuf {
        self.dir.join(format!("{stem}.tif"))
    }

    /// Path of a COG artifact, `<prefix>_COG.tif`.
    pub fn cog_path(&self, prefix: &str) -> PathBuf {
        self.dir.join(format!("{prefix}_COG.tif"))
    }

    /// Path for an uploaded file, keeping only a safe form of its name.
    pub fn upload_path(&self, original_name: &str) -> PathBuf {
        self.dir.join(sanitize_file_name(original_name))
    }

    /// Existing file in this workspace, if `file_name` is a plain name.
    pub fn artifact(&self, file_name: &str) -> Option<PathBuf> {
        if !is_safe_file_name(file_name) {
            return None;
        }
        let path = self.dir.join(file_name);
        path.is_file().then_some(path)
    }
}

/// True for a single path component with no separators or dot-only names.
pub fn is_safe_file_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\', '\0'])
}

/// Reduce an uploaded file name to its last component, replacing anything
/// outside `[A-Za-z0-9._-]` with `_`.
pub fn sanitize_file_name(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or("");
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();

    if cleaned.is_empty() || cleaned.chars().all(|c| c == '.') {
        "upload.h5".to_string()
    } else {
        cleaned
    }
}
