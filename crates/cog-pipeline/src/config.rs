//! Pipeline configuration.

use std::path::PathBuf;
use std::sync::Arc;

use geotiff_writer::Geotransform;

use crate::cog::{CogEncoder, GdalTranslate};
use crate::error::{PipelineError, Result};

/// Compression methods accepted for COG output.
pub const VALID_COMPRESSIONS: [&str; 4] = ["DEFLATE", "LZW", "ZSTD", "NONE"];

/// Settings shared by the CLI and the HTTP service.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Root under which per-job workspaces are created
    pub scratch_dir: PathBuf,
    /// Executable invoked as `<program> -of COG [-co K=V]... <in> <out>`
    pub encoder_program: PathBuf,
    /// COG `COMPRESS` creation option, if any
    pub compression: Option<String>,
    /// COG `BLOCKSIZE` creation option, if any
    pub block_size: Option<usize>,
    pub geotransform: Geotransform,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            scratch_dir: PathBuf::from("temp"),
            encoder_program: PathBuf::from("gdal_translate"),
            compression: None,
            block_size: None,
            geotransform: Geotransform::PLACEHOLDER,
        }
    }
}

impl PipelineConfig {
    /// Check the encoder options.
    pub fn validate(&self) -> Result<()> {
        if let Some(compression) = &self.compression {
            validate_compression(compression)?;
        }
        if let Some(block_size) = self.block_size {
            validate_block_size(block_size)?;
        }
        Ok(())
    }

    /// `-co` values for the encoder, in a stable order.
    pub fn creation_options(&self) -> Vec<String> {
        let mut options = Vec::new();
        if let Some(compression) = &self.compression {
            options.push(format!("COMPRESS={}", compression.to_uppercase()));
        }
        if let Some(block_size) = self.block_size {
            options.push(format!("BLOCKSIZE={block_size}"));
        }
        options
    }

    /// Validate and build the configured encoder.
    pub fn build_encoder(&self) -> Result<Arc<dyn CogEncoder>> {
        self.validate()?;
        Ok(Arc::new(
            GdalTranslate::new(&self.encoder_program)
                .with_creation_options(self.creation_options()),
        ))
    }
}

/// Validate a compression method name (case-insensitive).
pub fn validate_compression(compression: &str) -> Result<()> {
    let upper = compression.to_uppercase();
    if VALID_COMPRESSIONS.contains(&upper.as_str()) {
        Ok(())
    } else {
        Err(PipelineError::InvalidCompression(compression.to_string()))
    }
}

/// Validate a COG block size: positive and a multiple of 16.
pub fn validate_block_size(block_size: usize) -> Result<()> {
    if block_size == 0 || block_size % 16 != 0 {
        Err(PipelineError::InvalidBlockSize(block_size))
    } else {
        Ok(())
    }
}
