//! Source directory removal after reconciliation.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// A directory could not be removed.
///
/// Unlike move and delete failures, this propagates and terminates the
/// run after partial completion.
#[derive(Debug, Error)]
#[error("failed to remove directory {path}: {source}")]
pub struct CleanupError {
    /// Directory that failed to remove
    pub path: PathBuf,
    /// The underlying I/O error
    #[source]
    pub source: io::Error,
}

/// Results of the cleanup phase.
#[derive(Debug, Default)]
pub struct CleanupReport {
    /// Directories that were removed.
    pub removed: Vec<PathBuf>,
}

/// Recursively remove every source directory other than the resolved
/// output directory.
///
/// Removal is unconditional: a directory is deleted even when it still
/// contains entries that were never scanned as images or that failed
/// fingerprinting. Only the output directory is left populated.
///
/// # Errors
///
/// The first [`CleanupError`] is returned immediately; directories later
/// in the list are left in place.
pub fn cleanup_directories(
    directories: &[PathBuf],
    output: &Path,
) -> Result<CleanupReport, CleanupError> {
    let mut report = CleanupReport::default();

    for directory in directories {
        if directory == output {
            continue;
        }
        fs::remove_dir_all(directory).map_err(|source| CleanupError {
            path: directory.clone(),
            source,
        })?;
        log::debug!("removed directory: {}", directory.display());
        report.removed.push(directory.clone());
    }

    Ok(report)
}
