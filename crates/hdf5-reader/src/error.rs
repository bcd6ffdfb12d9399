//! Error types for band extraction.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for band extraction operations.
pub type ExtractResult<T> = Result<T, ExtractError>;

/// Error types for band extraction.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// The container path does not exist
    #[error("The file '{}' was not found", .0.display())]
    NotFound(PathBuf),

    /// No band was requested and no prompt is available to ask for one
    #[error("No band selected; available bands: {}", .available.join(", "))]
    MissingBandName { available: Vec<String> },

    /// Requested band is not a top-level dataset of the container
    #[error("Band '{band}' not found in the available bands")]
    InvalidBand { band: String, available: Vec<String> },

    /// Dataset rank is neither 2 nor 3
    #[error("Unsupported data shape for {band}: {shape:?}")]
    UnsupportedShape { band: String, shape: Vec<usize> },

    /// Element type has no single-band raster equivalent
    #[error("Unsupported data type for {band}: {dtype}")]
    UnsupportedDataType { band: String, dtype: String },

    /// Reading the band name interactively failed
    #[error("Failed to read band selection: {0}")]
    Prompt(#[from] std::io::Error),

    /// HDF5 library error
    #[error("HDF5 error: {0}")]
    Hdf5(#[from] hdf5::Error),
}
