//! In-memory band arrays tagged by element type.

use std::fmt;

use ndarray::ArrayD;

/// Element types a band can carry.
///
/// These are the numeric types with a one-to-one single-band raster
/// equivalent, so a band keeps its type all the way to the output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementType {
    U8,
    U16,
    I16,
    U32,
    I32,
    F32,
    F64,
}

impl ElementType {
    /// GDAL name of the matching raster band type (e.g. `UInt16`).
    pub fn gdal_name(&self) -> &'static str {
        match self {
            ElementType::U8 => "Byte",
            ElementType::U16 => "UInt16",
            ElementType::I16 => "Int16",
            ElementType::U32 => "UInt32",
            ElementType::I32 => "Int32",
            ElementType::F32 => "Float32",
            ElementType::F64 => "Float64",
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ElementType::U8 => "uint8",
            ElementType::U16 => "uint16",
            ElementType::I16 => "int16",
            ElementType::U32 => "uint32",
            ElementType::I32 => "int32",
            ElementType::F32 => "float32",
            ElementType::F64 => "float64",
        };
        f.write_str(name)
    }
}

/// A band materialized from a container.
#[derive(Debug, Clone, PartialEq)]
pub enum BandArray {
    U8(ArrayD<u8>),
    U16(ArrayD<u16>),
    I16(ArrayD<i16>),
    U32(ArrayD<u32>),
    I32(ArrayD<i32>),
    F32(ArrayD<f32>),
    F64(ArrayD<f64>),
}

/// Run an expression against the typed array inside a [`BandArray`].
///
/// The body is instantiated once per element type, so it may call generic
/// functions bounded on the element type.
///
/// ```ignore
/// let sum = with_band_array!(&band, |arr| arr.len());
/// ```
#[macro_export]
macro_rules! with_band_array {
    ($band:expr, |$arr:ident| $body:expr) => {
        match $band {
            $crate::BandArray::U8($arr) => $body,
            $crate::BandArray::U16($arr) => $body,
            $crate::BandArray::I16($arr) => $body,
            $crate::BandArray::U32($arr) => $body,
            $crate::BandArray::I32($arr) => $body,
            $crate::BandArray::F32($arr) => $body,
            $crate::BandArray::F64($arr) => $body,
        }
    };
}

impl BandArray {
    pub fn shape(&self) -> &[usize] {
        with_band_array!(self, |arr| arr.shape())
    }

    pub fn ndim(&self) -> usize {
        self.shape().len()
    }

    pub fn element_type(&self) -> ElementType {
        match self {
            BandArray::U8(_) => ElementType::U8,
            BandArray::U16(_) => ElementType::U16,
            BandArray::I16(_) => ElementType::I16,
            BandArray::U32(_) => ElementType::U32,
            BandArray::I32(_) => ElementType::I32,
            BandArray::F32(_) => ElementType::F32,
            BandArray::F64(_) => ElementType::F64,
        }
    }

    /// Number of 2-D slices: 1 for a rank-2 band, the leading axis length for rank 3.
    pub fn slice_count(&self) -> usize {
        match self.shape() {
            [slices, _, _] => *slices,
            _ => 1,
        }
    }
}
