//! Immediate candidate discovery for one directory.

use std::fs;
use std::path::{Path, PathBuf};

use super::ScanError;

/// List the immediate entries of `directory` as fingerprint candidates.
///
/// No recursion and no filtering: every entry is returned, including
/// subdirectories and files that are not images. Entries the signature
/// provider cannot decode are dropped later as per-item failures, so a
/// mixed directory does not abort the run.
///
/// The returned order is filesystem enumeration order and is not stable
/// across runs.
///
/// # Errors
///
/// [`ScanError::ReadDir`] when the directory cannot be listed.
pub fn list_candidates(directory: &Path) -> Result<Vec<PathBuf>, ScanError> {
    log::debug!("scanning directory for images: {}", directory.display());

    let entries = fs::read_dir(directory).map_err(|source| ScanError::ReadDir {
        path: directory.to_path_buf(),
        source,
    })?;

    let mut candidates = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| ScanError::ReadDir {
            path: directory.to_path_buf(),
            source,
        })?;
        candidates.push(entry.path());
    }

    log::trace!(
        "{} candidate(s) in {}",
        candidates.len(),
        directory.display()
    );
    Ok(candidates)
}
