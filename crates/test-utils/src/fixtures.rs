//! Common test fixtures for the conversion pipeline.
//!
//! Provides the reference containers used across the test suite and fake
//! `gdal_translate` executables that honour the `-of COG <in> <out>`
//! argument shape without needing GDAL tools installed.

use std::path::{Path, PathBuf};

use ndarray::{Array1, Array4};

use crate::generators::{ramp_u16, slice_stack_f32, ContainerBuilder};

/// Common band shapes for testing.
pub mod shapes {
    /// Single 2-D band, as in a typical imager channel
    pub const B04: (usize, usize) = (512, 512);

    /// Small 3-D stack
    pub const STACK: (usize, usize, usize) = (3, 64, 64);
}

/// Container with a `"B04"` band of shape `(512, 512)`, `u16`.
pub fn b04_container(dir: &Path) -> PathBuf {
    let (rows, cols) = shapes::B04;
    ContainerBuilder::create(dir.join("b04.h5"))
        .and_then(|c| c.with_dataset("B04", &ramp_u16(rows, cols)))
        .expect("Failed to build B04 container")
        .finish()
}

/// Container with a `"stack"` band of shape `(3, 64, 64)`, `f32`.
pub fn stack_container(dir: &Path) -> PathBuf {
    let (n, rows, cols) = shapes::STACK;
    ContainerBuilder::create(dir.join("stack.h5"))
        .and_then(|c| c.with_dataset("stack", &slice_stack_f32(n, rows, cols)))
        .expect("Failed to build stack container")
        .finish()
}

/// Container mixing valid and invalid bands:
/// `"B04"` (2-D), `"line"` (1-D), `"cube4"` (4-D) and a `"meta"` group.
pub fn mixed_rank_container(dir: &Path) -> PathBuf {
    ContainerBuilder::create(dir.join("mixed.h5"))
        .and_then(|c| c.with_dataset("B04", &ramp_u16(8, 8)))
        .and_then(|c| c.with_dataset("line", &Array1::<f32>::zeros(16)))
        .and_then(|c| c.with_dataset("cube4", &Array4::<u8>::zeros((2, 2, 4, 4))))
        .and_then(|c| c.with_group("meta"))
        .expect("Failed to build mixed container")
        .finish()
}

/// Write an executable shell script into `dir`.
#[cfg(unix)]
fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).expect("Failed to write script");
    let mut perms = std::fs::metadata(&path)
        .expect("Failed to stat script")
        .permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&path, perms).expect("Failed to chmod script");
    path
}

/// Fake encoder that copies the input raster to the output path.
///
/// The last two arguments are taken as input and output, so it works with
/// or without `-co` creation options. Every invocation appends its full
/// argument list to `<dir>/translate.log`.
#[cfg(unix)]
pub fn fake_translate_copy(dir: &Path) -> PathBuf {
    let log = dir.join("translate.log");
    let body = format!(
        r#"echo "$@" >> "{log}"
for last; do :; done
out="$last"
n=$#
i=0
for arg; do
  i=$((i + 1))
  if [ $i -eq $((n - 1)) ]; then in="$arg"; fi
done
cp "$in" "$out""#,
        log = log.display()
    );
    write_script(dir, "fake_gdal_translate", &body)
}

/// Fake encoder that leaves a partial output behind, prints `stderr` and exits 1.
#[cfg(unix)]
pub fn fake_translate_failing(dir: &Path, stderr: &str) -> PathBuf {
    let body = format!(
        r#"for last; do :; done
echo partial > "$last"
echo "{stderr}" >&2
exit 1"#
    );
    write_script(dir, "failing_gdal_translate", &body)
}

/// Invocations recorded by [`fake_translate_copy`], one argument line each.
pub fn translate_log(dir: &Path) -> Vec<String> {
    std::fs::read_to_string(dir.join("translate.log"))
        .map(|s| s.lines().map(str::to_string).collect())
        .unwrap_or_default()
}
