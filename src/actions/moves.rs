//! Concurrent relocation of keep records into the output directory.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use rand::Rng;
use rayon::prelude::*;
use thiserror::Error;

use crate::scanner::ImageRecord;

/// Error type for move operations.
#[derive(Debug, Error)]
pub enum MoveError {
    /// The source path has no file name component.
    #[error("cannot move {0}: no file name")]
    InvalidSource(PathBuf),

    /// The pre-move collision-avoidance rename failed.
    #[error("failed to rename {path}: {source}")]
    Rename {
        /// Path that failed to rename
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The file could not be transferred to the output directory.
    #[error("failed to move {path} to {dest}: {source}")]
    Transfer {
        /// Source path
        path: PathBuf,
        /// Intended destination
        dest: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },
}

/// Results of the move phase.
#[derive(Debug, Default)]
pub struct MoveReport {
    /// Destination paths of successful moves.
    pub moved: Vec<PathBuf>,
    /// Failed moves with their errors.
    pub failures: Vec<(PathBuf, MoveError)>,
}

impl MoveReport {
    /// Check if every move succeeded.
    #[must_use]
    pub fn all_succeeded(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Move every scheduled record into `output`, running file operations
/// concurrently on the shared pool.
///
/// When a file with the same name already exists at the destination and
/// `replace` is false, the source is first renamed in place with a small
/// random numeric suffix appended to its stem. This is best-effort only:
/// the suffix space is small and unchecked, so two concurrent renames can
/// still collide.
///
/// A per-file failure is logged and recorded; it does not abort the batch.
pub fn execute_moves(
    pool: &rayon::ThreadPool,
    records: &[ImageRecord],
    output: &Path,
    replace: bool,
) -> MoveReport {
    let outcomes: Vec<(PathBuf, Result<PathBuf, MoveError>)> = pool.install(|| {
        records
            .par_iter()
            .map(|record| (record.path.clone(), move_into(record, output, replace)))
            .collect()
    });

    let mut report = MoveReport::default();
    for (path, outcome) in outcomes {
        match outcome {
            Ok(dest) => report.moved.push(dest),
            Err(error) => {
                log::error!("{error}");
                report.failures.push((path, error));
            }
        }
    }
    report
}

/// Move one record into the output directory, renaming first on a name
/// collision.
fn move_into(record: &ImageRecord, output: &Path, replace: bool) -> Result<PathBuf, MoveError> {
    let mut source = record.path.clone();
    let Some(file_name) = source.file_name().map(std::ffi::OsStr::to_os_string) else {
        return Err(MoveError::InvalidSource(source));
    };
    let mut dest = output.join(&file_name);

    log::debug!("moving file {} to {}", source.display(), output.display());

    if dest.exists() && !replace {
        let suffix: u32 = rand::rng().random_range(0..=10);
        let renamed = with_suffixed_stem(&source, suffix);
        log::debug!(
            "renaming image {} to {}",
            source.display(),
            renamed.display()
        );
        fs::rename(&source, &renamed).map_err(|io_err| MoveError::Rename {
            path: source.clone(),
            source: io_err,
        })?;
        source = renamed;
        let Some(file_name) = source.file_name().map(std::ffi::OsStr::to_os_string) else {
            return Err(MoveError::InvalidSource(source));
        };
        dest = output.join(file_name);
    }

    transfer(&source, &dest).map_err(|io_err| MoveError::Transfer {
        path: source.clone(),
        dest: dest.clone(),
        source: io_err,
    })?;
    Ok(dest)
}

/// Append `suffix` to the file stem, keeping the extension.
fn with_suffixed_stem(path: &Path, suffix: u32) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match path.extension() {
        Some(ext) => format!("{stem}{suffix}.{}", ext.to_string_lossy()),
        None => format!("{stem}{suffix}"),
    };
    path.with_file_name(name)
}

/// Rename, falling back to copy + delete across filesystem boundaries.
fn transfer(source: &Path, dest: &Path) -> io::Result<()> {
    if fs::rename(source, dest).is_ok() {
        return Ok(());
    }
    fs::copy(source, dest)?;
    fs::remove_file(source)
}
