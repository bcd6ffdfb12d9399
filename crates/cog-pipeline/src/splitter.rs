//! Per-slice conversion of 3-D bands.

use std::path::PathBuf;

use gdal::raster::GdalType;
use geotiff_writer::{write_with_geotransform, Geotransform};
use ndarray::ArrayView3;
use tracing::debug;

use crate::cog::{convert_to_cog, CogEncoder};
use crate::error::Result;
use crate::workspace::JobWorkspace;

/// File stem of slice `index` of `band`.
pub fn slice_stem(band: &str, index: usize) -> String {
    format!("{band}_band_{index}")
}

/// Write each slice along axis 0 as `<band>_band_<i>.tif` and encode it to
/// `<band>_band_<i>_COG.tif`.
///
/// Returns the COG paths in slice order. Stops at the first failure;
/// slices already converted stay on disk.
pub fn split_and_convert<T>(
    array: ArrayView3<'_, T>,
    band: &str,
    geotransform: &Geotransform,
    workspace: &JobWorkspace,
    encoder: &dyn CogEncoder,
) -> Result<Vec<PathBuf>>
where
    T: GdalType + Copy,
{
    let mut outputs = Vec::with_capacity(array.len_of(ndarray::Axis(0)));

    for (index, slice) in array.outer_iter().enumerate() {
        let stem = slice_stem(band, index);
        let raster = workspace.raster_path(&stem);
        debug!(band = %band, slice = index, path = %raster.display(), "Writing slice");

        write_with_geotransform(slice, &raster, geotransform)?;
        outputs.push(convert_to_cog(encoder, &raster, &stem, workspace)?);
    }

    Ok(outputs)
}
