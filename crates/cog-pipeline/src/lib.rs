//! HDF5 band to Cloud-Optimized GeoTIFF conversion.
//!
//! Ties together band extraction ([`hdf5_reader`]), GeoTIFF writing
//! ([`geotiff_writer`]) and COG encoding. Each conversion runs inside its own
//! [`JobWorkspace`].
//!
//! ```ignore
//! use std::path::Path;
//! use cog_pipeline::{JobWorkspace, Pipeline, PipelineConfig};
//!
//! let config = PipelineConfig::default();
//! let pipeline = Pipeline::from_config(&config)?;
//! let workspace = JobWorkspace::create(&config.scratch_dir)?;
//! let output = pipeline.process(Path::new("scene.h5"), Some("B04"), None, &workspace)?;
//! println!("COG output file: {}", output.primary.display());
//! ```

pub mod cog;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod splitter;
pub mod workspace;

pub use cog::{convert_to_cog, CogEncoder, GdalTranslate};
pub use config::{validate_block_size, validate_compression, PipelineConfig, VALID_COMPRESSIONS};
pub use error::{PipelineError, Result};
pub use pipeline::{ConversionOutput, Pipeline};
pub use splitter::{slice_stem, split_and_convert};
pub use workspace::{is_safe_file_name, sanitize_file_name, JobWorkspace};
