//! Georeferenced raster writing.
//!
//! Turns a 2-D array into a single-band GeoTIFF with a fixed geographic
//! reference and a north-up transform derived from a [`Geotransform`].

pub mod error;
pub mod geotransform;
pub mod writer;

pub use error::{RasterError, RasterResult};
pub use geotransform::{from_origin, Geotransform};
pub use writer::{
    read_band, read_raster_info, write_raster, write_with_geotransform, RasterInfo,
    GEOGRAPHIC_PROJ4,
};
