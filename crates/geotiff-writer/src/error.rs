//! Error types for raster writing.

use thiserror::Error;

/// Result type for raster operations.
pub type RasterResult<T> = Result<T, RasterError>;

/// Errors that can occur while writing or inspecting a raster.
#[derive(Error, Debug)]
pub enum RasterError {
    #[error("GDAL error: {0}")]
    Gdal(#[from] gdal::errors::GdalError),

    #[error("Raster has invalid dimensions: {0}x{1}")]
    InvalidDimensions(usize, usize),

    #[error("Pixel size must be positive and finite: {0}")]
    InvalidPixelSize(f64),

    #[error("Invalid geotransform '{0}': expected six comma-separated numbers")]
    InvalidGeotransform(String),
}
