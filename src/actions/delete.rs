//! Concurrent deletion of duplicate records.
//!
//! Deletions are permanent unlinks. Failures are per-item: they are
//! logged, collected into the report, and processing continues with the
//! remaining files.

use std::fs;
use std::io;
use std::path::PathBuf;

use rayon::prelude::*;
use thiserror::Error;

use crate::scanner::ImageRecord;

/// Error type for deletion operations.
#[derive(Debug, Error)]
pub enum DeleteError {
    /// File was not found (may have been deleted or moved already).
    #[error("file not found: {0}")]
    NotFound(PathBuf),

    /// General I/O error.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },
}

/// Results of the delete phase.
#[derive(Debug, Default)]
pub struct DeleteReport {
    /// Number of files unlinked.
    pub deleted: usize,
    /// Failed deletions with their errors.
    pub failures: Vec<(PathBuf, DeleteError)>,
}

impl DeleteReport {
    /// Check if every deletion succeeded.
    #[must_use]
    pub fn all_succeeded(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Unlink every scheduled record, running up to the pool's thread count of
/// operations concurrently.
pub fn execute_deletes(pool: &rayon::ThreadPool, records: &[ImageRecord]) -> DeleteReport {
    let outcomes: Vec<(PathBuf, Result<(), DeleteError>)> = pool.install(|| {
        records
            .par_iter()
            .map(|record| (record.path.clone(), delete_one(&record.path)))
            .collect()
    });

    let mut report = DeleteReport::default();
    for (path, outcome) in outcomes {
        match outcome {
            Ok(()) => report.deleted += 1,
            Err(error) => {
                log::error!("{error}");
                report.failures.push((path, error));
            }
        }
    }
    report
}

fn delete_one(path: &std::path::Path) -> Result<(), DeleteError> {
    log::debug!("removing file: {}", path.display());
    fs::remove_file(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => DeleteError::NotFound(path.to_path_buf()),
        _ => DeleteError::Io {
            path: path.to_path_buf(),
            source,
        },
    })
}
