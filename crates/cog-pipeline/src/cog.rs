//! Cloud-Optimized GeoTIFF encoding.
//!
//! The conversion itself is delegated to an external encoder behind the
//! [`CogEncoder`] trait. [`GdalTranslate`] runs the GDAL command-line tool;
//! tests substitute their own implementations.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::error::{PipelineError, Result};
use crate::workspace::JobWorkspace;

/// Re-encodes a GeoTIFF as a COG.
pub trait CogEncoder: Send + Sync {
    /// Encode `input` into a new file at `output`.
    fn encode(&self, input: &Path, output: &Path) -> Result<()>;
}

/// Encoder that shells out to `gdal_translate -of COG`.
#[derive(Debug, Clone)]
pub struct GdalTranslate {
    program: PathBuf,
    creation_options: Vec<String>,
}

impl GdalTranslate {
    pub fn new<P: Into<PathBuf>>(program: P) -> Self {
        Self {
            program: program.into(),
            creation_options: Vec::new(),
        }
    }

    /// Add `-co KEY=VALUE` options, e.g. `COMPRESS=DEFLATE`.
    pub fn with_creation_options(mut self, options: Vec<String>) -> Self {
        self.creation_options = options;
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Full argument list for one conversion.
    pub fn args(&self, input: &Path, output: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec!["-of".into(), "COG".into()];
        for option in &self.creation_options {
            args.push("-co".into());
            args.push(option.into());
        }
        args.push(input.into());
        args.push(output.into());
        args
    }
}

impl Default for GdalTranslate {
    fn default() -> Self {
        Self::new("gdal_translate")
    }
}

impl CogEncoder for GdalTranslate {
    fn encode(&self, input: &Path, output: &Path) -> Result<()> {
        let args = self.args(input, output);
        debug!(program = %self.program.display(), args = ?args, "Running COG encoder");

        let result = Command::new(&self.program)
            .args(&args)
            .output()
            .map_err(|e| PipelineError::EncoderUnavailable {
                program: self.program.display().to_string(),
                source: e,
            })?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr).trim().to_string();
            let message = if stderr.is_empty() {
                format!("encoder exited with {}", result.status)
            } else {
                stderr
            };
            return Err(PipelineError::Encoding { message });
        }

        Ok(())
    }
}

/// Encode `input` as `<output_prefix>_COG.tif` inside `workspace`.
///
/// On failure nothing is left at the output path.
pub fn convert_to_cog(
    encoder: &dyn CogEncoder,
    input: &Path,
    output_prefix: &str,
    workspace: &JobWorkspace,
) -> Result<PathBuf> {
    let output = workspace.cog_path(output_prefix);
    let start = Instant::now();

    match encoder.encode(input, &output) {
        Ok(()) => {
            info!(
                input = %input.display(),
                output = %output.display(),
                duration_ms = start.elapsed().as_millis() as u64,
                "COG created"
            );
            Ok(output)
        }
        Err(e) => {
            warn!(input = %input.display(), error = %e, "COG conversion failed");
            if output.exists() {
                if let Err(rm) = std::fs::remove_file(&output) {
                    warn!(path = %output.display(), error = %rm, "Failed to remove partial COG");
                }
            }
            Err(e)
        }
    }
}
