//! The `gdal_translate` encoder against stand-in scripts and, when
//! installed, the real tool.

use cog_pipeline::{JobWorkspace, Pipeline, PipelineConfig, PipelineError};
use geotiff_writer::read_raster_info;
use test_utils::{b04_container, require_tool, stack_container, temp_test_dir};

#[cfg(unix)]
use test_utils::{fake_translate_copy, fake_translate_failing, translate_log};

#[cfg(unix)]
#[test]
fn test_invocation_shape_with_creation_options() {
    let dir = temp_test_dir();
    let container = b04_container(dir.path());
    let config = PipelineConfig {
        scratch_dir: dir.path().join("scratch"),
        encoder_program: fake_translate_copy(dir.path()),
        compression: Some("deflate".to_string()),
        block_size: Some(256),
        ..Default::default()
    };
    let pipeline = Pipeline::from_config(&config).unwrap();
    let ws = JobWorkspace::create(&config.scratch_dir).unwrap();

    let output = pipeline.process(&container, Some("B04"), None, &ws).unwrap();

    assert!(output.primary.exists());
    let log = translate_log(dir.path());
    assert_eq!(log.len(), 1);
    assert_eq!(
        log[0],
        format!(
            "-of COG -co COMPRESS=DEFLATE -co BLOCKSIZE=256 {} {}",
            ws.raster_path("B04").display(),
            ws.cog_path("B04").display()
        )
    );
}

#[cfg(unix)]
#[test]
fn test_stack_invokes_tool_per_slice() {
    let dir = temp_test_dir();
    let container = stack_container(dir.path());
    let config = PipelineConfig {
        encoder_program: fake_translate_copy(dir.path()),
        ..Default::default()
    };
    let pipeline = Pipeline::from_config(&config).unwrap();
    let ws = JobWorkspace::create(dir.path().join("scratch")).unwrap();

    let output = pipeline.process(&container, Some("stack"), None, &ws).unwrap();

    assert_eq!(output.slices.len(), 3);
    let log = translate_log(dir.path());
    assert_eq!(log.len(), 4);
    assert!(log[0].ends_with("stack_band_0_COG.tif"));
    assert!(log[3].ends_with("stack_COG.tif"));
}

#[cfg(unix)]
#[test]
fn test_tool_failure_reports_stderr_and_removes_output() {
    let dir = temp_test_dir();
    let container = b04_container(dir.path());
    let config = PipelineConfig {
        encoder_program: fake_translate_failing(dir.path(), "bad driver"),
        ..Default::default()
    };
    let pipeline = Pipeline::from_config(&config).unwrap();
    let ws = JobWorkspace::create(dir.path().join("scratch")).unwrap();

    let err = pipeline
        .process(&container, Some("B04"), None, &ws)
        .unwrap_err();

    match &err {
        PipelineError::Encoding { message } => assert_eq!(message, "bad driver"),
        other => panic!("expected Encoding error, got {other:?}"),
    }
    assert_eq!(err.to_string(), "Error converting to COG: bad driver");
    assert!(!ws.cog_path("B04").exists());
}

#[test]
fn test_missing_tool() {
    let dir = temp_test_dir();
    let container = b04_container(dir.path());
    let config = PipelineConfig {
        encoder_program: dir.path().join("not_installed"),
        ..Default::default()
    };
    let pipeline = Pipeline::from_config(&config).unwrap();
    let ws = JobWorkspace::create(dir.path().join("scratch")).unwrap();

    let err = pipeline
        .process(&container, Some("B04"), None, &ws)
        .unwrap_err();

    assert!(matches!(err, PipelineError::EncoderUnavailable { .. }));
    assert_eq!(err.kind(), "encoding");
}

#[test]
fn test_real_gdal_translate_produces_cog() {
    let program = require_tool!("gdal_translate");
    let dir = temp_test_dir();
    let container = b04_container(dir.path());
    let config = PipelineConfig {
        encoder_program: program,
        compression: Some("DEFLATE".to_string()),
        ..Default::default()
    };
    let pipeline = Pipeline::new(config.build_encoder().unwrap());
    let ws = JobWorkspace::create(dir.path().join("scratch")).unwrap();

    let output = pipeline.process(&container, Some("B04"), None, &ws).unwrap();

    let info = read_raster_info(&output.primary).unwrap();
    assert_eq!((info.width, info.height), (512, 512));
    assert_eq!(info.band_count, 1);
    assert_eq!(info.band_type, "UInt16");
}
