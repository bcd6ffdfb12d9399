//! HDF5 band extraction.
//!
//! Opens a hierarchical scientific container, enumerates its top-level
//! datasets ("bands") and materializes one of them in memory.
//!
//! # Supported bands
//!
//! Only rank-2 `(rows, cols)` and rank-3 `(slices, rows, cols)` datasets are
//! accepted, with element types `u8`, `u16`, `i16`, `u32`, `i32`, `f32` or
//! `f64`. Everything else is rejected before the data is read.
//!
//! # Example
//!
//! ```no_run
//! use hdf5_reader::extract_band;
//!
//! let band = extract_band("scene.h5", Some("B04"), None).unwrap();
//! println!("{} {:?}", band.name, band.array.shape());
//! ```

pub mod band;
pub mod error;
pub mod reader;

pub use band::{BandArray, ElementType};
pub use error::{ExtractError, ExtractResult};
pub use reader::{
    describe_bands, extract_band, list_bands, silence_hdf5_errors, BandInfo, BandPrompt,
    ExtractedBand,
};
