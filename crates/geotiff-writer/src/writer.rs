//! Single-band GeoTIFF creation.

use std::path::Path;

use gdal::raster::{Buffer, GdalType};
use gdal::spatial_ref::SpatialRef;
use gdal::{Dataset, DriverManager};
use ndarray::ArrayView2;
use tracing::{debug, info};

use crate::error::{RasterError, RasterResult};
use crate::geotransform::{from_origin, Geotransform};

/// Plain geographic longitude/latitude reference stamped on every output.
pub const GEOGRAPHIC_PROJ4: &str = "+proj=longlat +datum=WGS84 +no_defs";

/// Size, type and georeferencing of a raster on disk.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterInfo {
    pub width: usize,
    pub height: usize,
    pub band_count: usize,
    /// GDAL type name of band 1 (e.g. `UInt16`)
    pub band_type: String,
    pub geotransform: [f64; 6],
}

/// Write a 2-D array as a single-band GeoTIFF.
///
/// Width and height come from the array's `(rows, cols)` shape and the band
/// type from `T`. The file is created or overwritten; a failure part way
/// through leaves whatever GDAL had written.
pub fn write_raster<T, P>(
    array: ArrayView2<'_, T>,
    destination: P,
    origin_x: f64,
    origin_y: f64,
    pixel_size_x: f64,
    pixel_size_y: f64,
) -> RasterResult<()>
where
    T: GdalType + Copy,
    P: AsRef<Path>,
{
    let destination = destination.as_ref();
    let (height, width) = array.dim();

    if width == 0 || height == 0 {
        return Err(RasterError::InvalidDimensions(width, height));
    }
    for size in [pixel_size_x, pixel_size_y] {
        if !size.is_finite() || size <= 0.0 {
            return Err(RasterError::InvalidPixelSize(size));
        }
    }

    let driver = DriverManager::get_driver_by_name("GTiff")?;
    let mut dataset = driver.create_with_band_type::<T, _>(destination, width, height, 1)?;

    let transform = from_origin(origin_x, origin_y, pixel_size_x, pixel_size_y);
    dataset.set_geo_transform(&transform)?;
    dataset.set_spatial_ref(&SpatialRef::from_proj4(GEOGRAPHIC_PROJ4)?)?;

    // Buffer wants row-major data; iter() yields logical order for any layout
    let data: Vec<T> = array.iter().copied().collect();
    let mut buffer = Buffer::new((width, height), data);

    {
        let mut band = dataset.rasterband(1)?;
        band.write((0, 0), (width, height), &mut buffer)?;
    }
    dataset.flush_cache()?;

    debug!(transform = ?transform, "Geotransform written");
    info!(
        path = %destination.display(),
        width,
        height,
        band_type = %T::datatype().name(),
        "GeoTIFF created"
    );

    Ok(())
}

/// Write a 2-D array using the scaled output transform of `geotransform`.
pub fn write_with_geotransform<T, P>(
    array: ArrayView2<'_, T>,
    destination: P,
    geotransform: &Geotransform,
) -> RasterResult<()>
where
    T: GdalType + Copy,
    P: AsRef<Path>,
{
    let size = geotransform.pixel_size();
    write_raster(
        array,
        destination,
        geotransform.origin_x,
        geotransform.origin_y,
        size,
        size,
    )
}

/// Read back the size, band layout and transform of a raster.
pub fn read_raster_info<P: AsRef<Path>>(path: P) -> RasterResult<RasterInfo> {
    let dataset = Dataset::open(path.as_ref())?;
    let (width, height) = dataset.raster_size();
    let band_count = dataset.raster_count();
    let band_type = dataset.rasterband(1)?.band_type().name();
    let geotransform = dataset.geo_transform()?;

    Ok(RasterInfo {
        width,
        height,
        band_count,
        band_type,
        geotransform,
    })
}

/// Read band 1 of a raster into a 2-D array of `(rows, cols)`.
pub fn read_band<T, P>(path: P) -> RasterResult<ndarray::Array2<T>>
where
    T: GdalType + Copy,
    P: AsRef<Path>,
{
    let dataset = Dataset::open(path.as_ref())?;
    let (width, height) = dataset.raster_size();
    let buffer = dataset
        .rasterband(1)?
        .read_as::<T>((0, 0), (width, height), (width, height), None)?;

    let data: Vec<T> = buffer.into_iter().collect();
    ndarray::Array2::from_shape_vec((height, width), data)
        .map_err(|_| RasterError::InvalidDimensions(width, height))
}
