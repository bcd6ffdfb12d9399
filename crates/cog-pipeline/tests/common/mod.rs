//! In-process encoders for pipeline tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use cog_pipeline::{CogEncoder, PipelineError, Result};

/// Copies the input raster to the output path and records every call.
#[derive(Default)]
pub struct RecordingEncoder {
    calls: Mutex<Vec<(PathBuf, PathBuf)>>,
}

impl RecordingEncoder {
    pub fn calls(&self) -> Vec<(PathBuf, PathBuf)> {
        self.calls.lock().unwrap().clone()
    }
}

impl CogEncoder for RecordingEncoder {
    fn encode(&self, input: &Path, output: &Path) -> Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push((input.to_path_buf(), output.to_path_buf()));
        std::fs::copy(input, output)?;
        Ok(())
    }
}

/// Leaves a partial file at the output path, then fails with `message`.
pub struct FailingEncoder {
    pub message: String,
}

impl FailingEncoder {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

impl CogEncoder for FailingEncoder {
    fn encode(&self, _input: &Path, output: &Path) -> Result<()> {
        std::fs::write(output, b"partial")?;
        Err(PipelineError::Encoding {
            message: self.message.clone(),
        })
    }
}

/// Files directly inside `dir`, sorted by name.
pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
