//! Shared test utilities for the hdf5-cog workspace.
//!
//! This crate provides common testing infrastructure including:
//! - HDF5 container and band array generators
//! - Fake `gdal_translate` scripts for exercising the COG step without GDAL tools
//! - Skip macros for tests that need real external tools
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { workspace = true }
//! ```
//!
//! Then import in your tests:
//!
//! ```ignore
//! use test_utils::{require_tool, ContainerBuilder};
//! ```

pub mod fixtures;
pub mod generators;
pub mod paths;

// Re-export commonly used items at the crate root
pub use fixtures::*;
pub use generators::*;
pub use paths::*;

/// Macro to skip a test if a required executable is not on `PATH`.
///
/// Tests that need the real `gdal_translate` use this so they still pass on
/// machines that only have the GDAL/HDF5 libraries.
///
/// # Usage
///
/// ```ignore
/// use test_utils::require_tool;
///
/// #[test]
/// fn test_real_cog() {
///     let program = require_tool!("gdal_translate");
///     // Test code using program...
/// }
/// ```
///
/// If the tool is not found, the test will print a skip message and return early.
#[macro_export]
macro_rules! require_tool {
    ($name:expr) => {{
        match $crate::find_on_path($name) {
            Some(path) => path,
            None => {
                eprintln!("SKIPPED: '{}' not found on PATH.", $name);
                return;
            }
        }
    }};
}

/// Macro for approximate floating-point equality assertions.
///
/// # Usage
///
/// ```ignore
/// use test_utils::assert_approx_eq;
///
/// assert_approx_eq!(1.0001_f64, 1.0_f64, 0.001_f64); // passes
/// assert_approx_eq!(1.1_f32, 1.0_f32, 0.001_f32);    // fails
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr, $epsilon:expr) => {{
        let left: f64 = $left as f64;
        let right: f64 = $right as f64;
        let epsilon: f64 = $epsilon as f64;
        let diff = (left - right).abs();
        if diff > epsilon {
            panic!(
                "assertion failed: `(left ≈ right)`\n  left: `{:?}`,\n right: `{:?}`,\n  diff: `{:?}` > epsilon `{:?}`",
                left, right, diff, epsilon
            );
        }
    }};
}
