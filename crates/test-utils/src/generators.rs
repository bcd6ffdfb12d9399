//! Generators for synthetic bands and HDF5 containers.
//!
//! Values are predictable so tests can check that data survives the
//! container → raster round trip.

use std::path::{Path, PathBuf};

use hdf5::H5Type;
use ndarray::{Array, Array2, Array3, Dimension};

/// Creates a 2-D `u16` band where each cell is `(row * cols + col) % 65536`.
///
/// # Example
///
/// ```
/// use test_utils::ramp_u16;
///
/// let band = ramp_u16(4, 10);
/// assert_eq!(band[[0, 1]], 1);
/// assert_eq!(band[[1, 0]], 10);
/// ```
pub fn ramp_u16(rows: usize, cols: usize) -> Array2<u16> {
    Array2::from_shape_fn((rows, cols), |(r, c)| ((r * cols + c) % 65536) as u16)
}

/// Creates a 3-D `f32` stack where slice `i` is filled with `i * 100 + row`.
///
/// Every slice differs, so a test can tell which slice a raster came from.
pub fn slice_stack_f32(slices: usize, rows: usize, cols: usize) -> Array3<f32> {
    Array3::from_shape_fn((slices, rows, cols), |(i, r, _)| (i * 100 + r) as f32)
}

/// Builds an HDF5 container with top-level datasets.
///
/// # Example
///
/// ```no_run
/// use test_utils::{ContainerBuilder, ramp_u16};
///
/// let path = ContainerBuilder::create("/tmp/scene.h5")
///     .unwrap()
///     .with_dataset("B04", &ramp_u16(16, 16))
///     .unwrap()
///     .finish();
/// ```
pub struct ContainerBuilder {
    file: hdf5::File,
    path: PathBuf,
}

impl ContainerBuilder {
    /// Create (or truncate) a container at `path`.
    pub fn create<P: AsRef<Path>>(path: P) -> hdf5::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = hdf5::File::create(&path)?;
        Ok(Self { file, path })
    }

    /// Add a top-level dataset holding `data`.
    pub fn with_dataset<T, D>(self, name: &str, data: &Array<T, D>) -> hdf5::Result<Self>
    where
        T: H5Type,
        D: Dimension,
    {
        self.file
            .new_dataset_builder()
            .with_data(data)
            .create(name)?;
        Ok(self)
    }

    /// Add a top-level group (not a band).
    pub fn with_group(self, name: &str) -> hdf5::Result<Self> {
        self.file.create_group(name)?;
        Ok(self)
    }

    /// Close the container and return its path.
    pub fn finish(self) -> PathBuf {
        let Self { file, path } = self;
        drop(file);
        path
    }
}
