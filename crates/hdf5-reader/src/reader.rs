//! Band extraction from HDF5 containers using the native HDF5 library.
//!
//! A container is opened read-only for the duration of one call and closed
//! as soon as the selected dataset is in memory.

use std::path::Path;
use std::sync::Once;

use hdf5::types::{FloatSize, IntSize, TypeDescriptor};
use tracing::{debug, info};

use crate::band::BandArray;
use crate::error::{ExtractError, ExtractResult};

/// Source of a band name when the caller did not supply one.
///
/// Only interactive front ends implement this; server contexts pass `None`
/// and get [`ExtractError::MissingBandName`] instead.
pub trait BandPrompt {
    /// Pick one of `available`. The answer is validated by the caller.
    fn choose_band(&self, available: &[String]) -> std::io::Result<String>;
}

/// A band read from a container, with the name it was resolved under.
#[derive(Debug, Clone)]
pub struct ExtractedBand {
    pub name: String,
    pub array: BandArray,
}

/// Shape and element type of a top-level dataset, without its data.
#[derive(Debug, Clone, PartialEq)]
pub struct BandInfo {
    pub name: String,
    pub shape: Vec<usize>,
    pub dtype: String,
}

/// Silence the HDF5 library's automatic error printing to stderr.
///
/// Errors are still returned to the caller; this only stops the C library
/// from dumping its diagnostic stack for every failed call. Safe to call
/// repeatedly.
pub fn silence_hdf5_errors() {
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        hdf5::silence_errors(true);
    });
}

fn open_container(path: &Path) -> ExtractResult<hdf5::File> {
    if !path.exists() {
        return Err(ExtractError::NotFound(path.to_path_buf()));
    }

    silence_hdf5_errors();
    Ok(hdf5::File::open(path)?)
}

fn dataset_names(file: &hdf5::File) -> ExtractResult<Vec<String>> {
    let names = file
        .datasets()?
        .iter()
        .map(|ds| ds.name().trim_start_matches('/').to_string())
        .collect();
    Ok(names)
}

/// List the top-level dataset names ("bands") of a container.
pub fn list_bands<P: AsRef<Path>>(path: P) -> ExtractResult<Vec<String>> {
    let file = open_container(path.as_ref())?;
    dataset_names(&file)
}

/// Describe every top-level dataset of a container.
pub fn describe_bands<P: AsRef<Path>>(path: P) -> ExtractResult<Vec<BandInfo>> {
    let file = open_container(path.as_ref())?;

    file.datasets()?
        .iter()
        .map(|ds| -> ExtractResult<BandInfo> {
            let dtype = ds.dtype()?.to_descriptor()?;
            Ok(BandInfo {
                name: ds.name().trim_start_matches('/').to_string(),
                shape: ds.shape(),
                dtype: dtype.to_string(),
            })
        })
        .collect()
}

/// Extract one band from a container.
///
/// `band` may be `None` or empty, in which case `prompt` is asked to pick
/// one; without a prompt this fails with [`ExtractError::MissingBandName`].
/// The rank is checked from the dataset's metadata, so a rejected band is
/// never read.
pub fn extract_band<P: AsRef<Path>>(
    path: P,
    band: Option<&str>,
    prompt: Option<&dyn BandPrompt>,
) -> ExtractResult<ExtractedBand> {
    let path = path.as_ref();
    let file = open_container(path)?;

    let available = dataset_names(&file)?;
    info!(
        container = %path.display(),
        bands = %available.join(", "),
        "Available bands"
    );

    let name = match band.map(str::trim).filter(|b| !b.is_empty()) {
        Some(name) => name.to_string(),
        None => match prompt {
            Some(prompt) => prompt.choose_band(&available)?.trim().to_string(),
            None => return Err(ExtractError::MissingBandName { available }),
        },
    };

    if !available.iter().any(|b| b == &name) {
        return Err(ExtractError::InvalidBand {
            band: name,
            available,
        });
    }

    let dataset = file.dataset(&name)?;
    let shape = dataset.shape();
    debug!(band = %name, shape = ?shape, "Dataset shape");

    if shape.len() != 2 && shape.len() != 3 {
        return Err(ExtractError::UnsupportedShape { band: name, shape });
    }

    let array = read_dataset(&dataset, &name)?;
    info!(
        band = %name,
        shape = ?array.shape(),
        dtype = %array.element_type(),
        "Band loaded into memory"
    );

    Ok(ExtractedBand { name, array })
}

fn read_dataset(dataset: &hdf5::Dataset, name: &str) -> ExtractResult<BandArray> {
    let descriptor = dataset.dtype()?.to_descriptor()?;

    let array = match descriptor {
        TypeDescriptor::Unsigned(IntSize::U1) => BandArray::U8(dataset.read_dyn()?),
        TypeDescriptor::Unsigned(IntSize::U2) => BandArray::U16(dataset.read_dyn()?),
        TypeDescriptor::Integer(IntSize::U2) => BandArray::I16(dataset.read_dyn()?),
        TypeDescriptor::Unsigned(IntSize::U4) => BandArray::U32(dataset.read_dyn()?),
        TypeDescriptor::Integer(IntSize::U4) => BandArray::I32(dataset.read_dyn()?),
        TypeDescriptor::Float(FloatSize::U4) => BandArray::F32(dataset.read_dyn()?),
        TypeDescriptor::Float(FloatSize::U8) => BandArray::F64(dataset.read_dyn()?),
        other => {
            return Err(ExtractError::UnsupportedDataType {
                band: name.to_string(),
                dtype: other.to_string(),
            })
        }
    };

    Ok(array)
}
