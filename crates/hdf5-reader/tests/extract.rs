//! Integration tests for band extraction against generated HDF5 containers.

use std::cell::RefCell;

use hdf5_reader::{
    describe_bands, extract_band, list_bands, BandArray, BandPrompt, ElementType, ExtractError,
};
use ndarray::Array2;
use test_utils::{
    b04_container, mixed_rank_container, stack_container, temp_test_dir, ContainerBuilder,
};

/// Prompt that answers with a fixed name and remembers what it was offered.
struct ScriptedPrompt {
    answer: String,
    offered: RefCell<Vec<String>>,
}

impl ScriptedPrompt {
    fn new(answer: &str) -> Self {
        Self {
            answer: answer.to_string(),
            offered: RefCell::new(Vec::new()),
        }
    }
}

impl BandPrompt for ScriptedPrompt {
    fn choose_band(&self, available: &[String]) -> std::io::Result<String> {
        *self.offered.borrow_mut() = available.to_vec();
        Ok(format!("{}\n", self.answer))
    }
}

#[test]
fn test_extract_2d_band_keeps_shape_and_type() {
    let dir = temp_test_dir();
    let path = b04_container(dir.path());

    let band = extract_band(&path, Some("B04"), None).unwrap();

    assert_eq!(band.name, "B04");
    assert_eq!(band.array.shape(), &[512, 512]);
    assert_eq!(band.array.element_type(), ElementType::U16);
    match &band.array {
        BandArray::U16(arr) => {
            assert_eq!(arr[[0, 1]], 1);
            assert_eq!(arr[[1, 0]], 512);
        }
        other => panic!("Expected u16 band, got {:?}", other.element_type()),
    }
}

#[test]
fn test_extract_3d_band() {
    let dir = temp_test_dir();
    let path = stack_container(dir.path());

    let band = extract_band(&path, Some("stack"), None).unwrap();

    assert_eq!(band.array.shape(), &[3, 64, 64]);
    assert_eq!(band.array.slice_count(), 3);
    assert_eq!(band.array.element_type(), ElementType::F32);
}

#[test]
fn test_missing_container_is_not_found() {
    let dir = temp_test_dir();
    let missing = dir.path().join("nope.h5");

    let err = extract_band(&missing, Some("B04"), None).unwrap_err();

    assert!(matches!(err, ExtractError::NotFound(ref p) if p == &missing));
    assert!(err.to_string().contains("was not found"));
}

#[test]
fn test_unknown_band_is_invalid_and_writes_nothing() {
    let dir = temp_test_dir();
    let path = b04_container(dir.path());
    let before: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();

    let err = extract_band(&path, Some("B99"), None).unwrap_err();

    match err {
        ExtractError::InvalidBand { band, available } => {
            assert_eq!(band, "B99");
            assert_eq!(available, vec!["B04".to_string()]);
        }
        other => panic!("Expected InvalidBand, got {other:?}"),
    }
    let after: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
    assert_eq!(before.len(), after.len());
}

#[test]
fn test_rank_1_and_4_are_unsupported() {
    let dir = temp_test_dir();
    let path = mixed_rank_container(dir.path());

    for (name, rank) in [("line", 1), ("cube4", 4)] {
        let err = extract_band(&path, Some(name), None).unwrap_err();
        match err {
            ExtractError::UnsupportedShape { band, shape } => {
                assert_eq!(band, name);
                assert_eq!(shape.len(), rank);
            }
            other => panic!("Expected UnsupportedShape for {name}, got {other:?}"),
        }
    }
}

#[test]
fn test_types_without_a_portable_gdal_band_type_are_rejected() {
    let dir = temp_test_dir();
    let path = ContainerBuilder::create(dir.path().join("wide.h5"))
        .and_then(|c| c.with_dataset("i8", &Array2::<i8>::zeros((4, 4))))
        .and_then(|c| c.with_dataset("i64", &Array2::<i64>::zeros((4, 4))))
        .and_then(|c| c.with_dataset("u64", &Array2::<u64>::zeros((4, 4))))
        .unwrap()
        .finish();

    for name in ["i8", "i64", "u64"] {
        match extract_band(&path, Some(name), None).unwrap_err() {
            ExtractError::UnsupportedDataType { band, .. } => assert_eq!(band, name),
            other => panic!("Expected UnsupportedDataType for {name}, got {other:?}"),
        }
    }
}

#[test]
fn test_missing_band_without_prompt() {
    let dir = temp_test_dir();
    let path = b04_container(dir.path());

    for band in [None, Some(""), Some("   ")] {
        let err = extract_band(&path, band, None).unwrap_err();
        assert!(matches!(err, ExtractError::MissingBandName { .. }));
    }
}

#[test]
fn test_missing_band_uses_prompt() {
    let dir = temp_test_dir();
    let path = mixed_rank_container(dir.path());
    let prompt = ScriptedPrompt::new("B04");

    let band = extract_band(&path, None, Some(&prompt)).unwrap();

    assert_eq!(band.name, "B04");
    assert!(prompt.offered.borrow().contains(&"B04".to_string()));
}

#[test]
fn test_prompt_answer_is_validated() {
    let dir = temp_test_dir();
    let path = b04_container(dir.path());
    let prompt = ScriptedPrompt::new("IMG_VIS");

    let err = extract_band(&path, None, Some(&prompt)).unwrap_err();
    assert!(matches!(err, ExtractError::InvalidBand { .. }));
}

#[test]
fn test_list_bands_skips_groups() {
    let dir = temp_test_dir();
    let path = mixed_rank_container(dir.path());

    let mut bands = list_bands(&path).unwrap();
    bands.sort();

    assert_eq!(bands, vec!["B04", "cube4", "line"]);
}

#[test]
fn test_describe_bands() {
    let dir = temp_test_dir();
    let path = b04_container(dir.path());

    let info = describe_bands(&path).unwrap();

    assert_eq!(info.len(), 1);
    assert_eq!(info[0].name, "B04");
    assert_eq!(info[0].shape, vec![512, 512]);
}
