//! Error types for the conversion pipeline.

use geotiff_writer::RasterError;
use hdf5_reader::ExtractError;
use thiserror::Error;

/// Errors that can occur during a conversion.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error(transparent)]
    Raster(#[from] RasterError),

    #[error("Error converting to COG: {message}")]
    Encoding { message: String },

    #[error("Failed to run COG encoder '{program}': {source}")]
    EncoderUnavailable {
        program: String,
        source: std::io::Error,
    },

    #[error("Band '{0}' has no slices")]
    EmptyStack(String),

    #[error("Array shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),

    #[error("Invalid compression type: {0}")]
    InvalidCompression(String),

    #[error("Invalid block size: {0} (must be a positive multiple of 16)")]
    InvalidBlockSize(usize),

    #[error("Invalid job id: {0}")]
    InvalidJobId(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PipelineError {
    /// Short label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            PipelineError::Extract(ExtractError::NotFound(_)) => "not_found",
            PipelineError::Extract(ExtractError::MissingBandName { .. }) => "missing_band",
            PipelineError::Extract(ExtractError::InvalidBand { .. }) => "invalid_band",
            PipelineError::Extract(ExtractError::UnsupportedShape { .. }) => "unsupported_shape",
            PipelineError::Extract(ExtractError::UnsupportedDataType { .. }) => "unsupported_dtype",
            PipelineError::Extract(_) => "container",
            PipelineError::Raster(_) => "raster",
            PipelineError::Encoding { .. } | PipelineError::EncoderUnavailable { .. } => "encoding",
            PipelineError::EmptyStack(_) | PipelineError::Shape(_) => "unsupported_shape",
            PipelineError::InvalidCompression(_)
            | PipelineError::InvalidBlockSize(_)
            | PipelineError::InvalidJobId(_) => "config",
            PipelineError::Io(_) => "io",
        }
    }
}

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;
