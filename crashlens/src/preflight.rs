//! Pre-flight checks for crashlens
//!
//! Validates the input paths before any parsing starts, so a typo on the
//! command line gives an actionable message instead of an I/O error.

use anyhow::{bail, Result};
use std::path::Path;

/// Run all pre-flight checks before reading inputs
pub fn run_preflight_checks(map_path: &Path, log_path: &Path, data_root: &Path) -> Result<()> {
    check_input_file(map_path, "Map file", "--map")?;
    check_input_file(log_path, "Log file", "--log")?;
    check_data_root(data_root)?;
    Ok(())
}

/// Check that an input exists and is a regular file
fn check_input_file(path: &Path, what: &str, flag: &str) -> Result<()> {
    if !path.exists() {
        bail!(
            "{what} not found: {}\n\n\
             Make sure the path is correct and the file exists.",
            path.display()
        );
    }
    if !path.is_file() {
        bail!(
            "Not a file: {}\n\n\
             {flag} must point to a file, not a directory.",
            path.display()
        );
    }
    Ok(())
}

/// Check that the data root is a directory
fn check_data_root(data_root: &Path) -> Result<()> {
    if !data_root.is_dir() {
        bail!(
            "Data root not found: {}\n\n\
             --dta-root must point to the directory data file paths are relative to.",
            data_root.display()
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_not_found() {
        let result = check_input_file(Path::new("/nonexistent/game.map"), "Map file", "--map");
        let err = result.unwrap_err().to_string();
        assert!(err.contains("Map file not found"));
    }

    #[test]
    fn test_input_is_directory() {
        let dir = tempfile::tempdir().unwrap();
        let err = check_input_file(dir.path(), "Log file", "--log").unwrap_err().to_string();
        assert!(err.contains("Not a file"));
        assert!(err.contains("--log"));
    }

    #[test]
    fn test_all_checks_pass() {
        let dir = tempfile::tempdir().unwrap();
        let map = dir.path().join("game.map");
        let log = dir.path().join("crash.log");
        std::fs::write(&map, "").unwrap();
        std::fs::write(&log, "").unwrap();

        assert!(run_preflight_checks(&map, &log, dir.path()).is_ok());
    }

    #[test]
    fn test_data_root_must_be_directory() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let err = check_data_root(file.path()).unwrap_err().to_string();
        assert!(err.contains("Data root not found"));
    }
}
