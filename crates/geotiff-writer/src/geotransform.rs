//! Affine geotransform in GDAL order.

use std::fmt;
use std::str::FromStr;

use crate::error::RasterError;

/// `(originX, pixelWidth, rowRotation, originY, colRotation, pixelHeight)`.
///
/// Containers carry no georeferencing we read, so the default is the fixed
/// placeholder `(0, 1, 0, 0, 0, -1)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geotransform {
    pub origin_x: f64,
    pub pixel_width: f64,
    pub row_rotation: f64,
    pub origin_y: f64,
    pub col_rotation: f64,
    pub pixel_height: f64,
}

impl Geotransform {
    pub const PLACEHOLDER: Geotransform = Geotransform {
        origin_x: 0.0,
        pixel_width: 1.0,
        row_rotation: 0.0,
        origin_y: 0.0,
        col_rotation: 0.0,
        pixel_height: -1.0,
    };

    pub fn from_array(gt: [f64; 6]) -> Self {
        Self {
            origin_x: gt[0],
            pixel_width: gt[1],
            row_rotation: gt[2],
            origin_y: gt[3],
            col_rotation: gt[4],
            pixel_height: gt[5],
        }
    }

    pub fn to_array(&self) -> [f64; 6] {
        [
            self.origin_x,
            self.pixel_width,
            self.row_rotation,
            self.origin_y,
            self.col_rotation,
            self.pixel_height,
        ]
    }

    /// Scalar pixel size `sqrt(pixelWidth² + pixelHeight²)`.
    ///
    /// Used for both axes when writing, so non-square pixels collapse to one
    /// value.
    pub fn pixel_size(&self) -> f64 {
        (self.pixel_width.powi(2) + self.pixel_height.powi(2)).sqrt()
    }

    /// North-up transform actually written to the raster:
    /// `[originX, size, 0, originY, 0, -size]`.
    pub fn output_transform(&self) -> [f64; 6] {
        let size = self.pixel_size();
        from_origin(self.origin_x, self.origin_y, size, size)
    }
}

impl Default for Geotransform {
    fn default() -> Self {
        Self::PLACEHOLDER
    }
}

impl fmt::Display for Geotransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let gt = self.to_array();
        write!(
            f,
            "{},{},{},{},{},{}",
            gt[0], gt[1], gt[2], gt[3], gt[4], gt[5]
        )
    }
}

impl FromStr for Geotransform {
    type Err = RasterError;

    /// Parse six comma-separated numbers, e.g. `0,1,0,0,0,-1`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values: Vec<f64> = s
            .split(',')
            .map(|part| part.trim().parse::<f64>())
            .collect::<Result<_, _>>()
            .map_err(|_| RasterError::InvalidGeotransform(s.to_string()))?;

        let gt: [f64; 6] = values
            .try_into()
            .map_err(|_| RasterError::InvalidGeotransform(s.to_string()))?;

        Ok(Self::from_array(gt))
    }
}

/// Transform for a north-up raster whose top-left corner is `(origin_x, origin_y)`.
pub fn from_origin(origin_x: f64, origin_y: f64, pixel_size_x: f64, pixel_size_y: f64) -> [f64; 6] {
    [origin_x, pixel_size_x, 0.0, origin_y, 0.0, -pixel_size_y]
}
