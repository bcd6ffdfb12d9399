//! Path utilities for test workspaces and external tools.

use std::path::PathBuf;

/// Searches `PATH` for an executable.
///
/// # Arguments
///
/// * `name` - Program name (e.g., "gdal_translate")
///
/// # Returns
///
/// `Some(PathBuf)` with the first match, `None` if the program is not installed.
pub fn find_on_path(name: &str) -> Option<PathBuf> {
    let path_var = std::env::var_os("PATH")?;
    std::env::split_paths(&path_var)
        .map(|dir| dir.join(name))
        .find(|candidate| candidate.is_file())
}

/// Creates a temporary directory for test output.
///
/// The directory is automatically cleaned up when the returned `TempDir` is dropped.
pub fn temp_test_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary test directory")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_on_path_missing() {
        assert!(find_on_path("definitely-not-a-real-program-4f2a").is_none());
    }

    #[test]
    fn test_temp_test_dir_is_removed_on_drop() {
        let dir = temp_test_dir();
        let path = dir.path().to_path_buf();
        assert!(path.is_dir());
        drop(dir);
        assert!(!path.exists());
    }
}
