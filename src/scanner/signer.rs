//! Bounded-concurrency fingerprinting of one directory.
//!
//! [`sign_directory`] fans each candidate of a directory out on the shared
//! worker pool, computes its signature, and folds the successes into a
//! `signature -> records` map. Results are inserted as they arrive, not in
//! submission order, so the order of records within one directory's lists
//! is not deterministic. Failures are per-item and never abort the
//! directory.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::mpsc;

use rayon::prelude::*;

use super::{list_candidates, ImageRecord, ScanError, SignError, Signature, SignatureProvider};

/// One directory's `signature -> records` map.
pub type DirectoryIndex = HashMap<Signature, Vec<ImageRecord>>;

/// A candidate that could not be signed.
#[derive(Debug)]
pub struct ItemFailure {
    /// The candidate path.
    pub path: PathBuf,
    /// Why signing failed.
    pub error: SignError,
}

/// Outcome of scanning and signing one directory.
#[derive(Debug, Default)]
pub struct DirectoryReport {
    /// The scanned directory.
    pub directory: PathBuf,
    /// Number of candidates discovered.
    pub candidates: usize,
    /// Number of candidates successfully signed.
    pub signed: usize,
    /// Candidates dropped because signing failed.
    pub failures: Vec<ItemFailure>,
    /// Set when the directory itself could not be listed.
    pub scan_error: Option<ScanError>,
}

impl DirectoryReport {
    fn new(directory: &Path) -> Self {
        Self {
            directory: directory.to_path_buf(),
            ..Self::default()
        }
    }
}

/// Scan `directory` and compute a signature for every candidate, running
/// up to the pool's thread count of computations concurrently.
///
/// Per-item failures (unreadable files, non-images, subdirectories) are
/// logged, recorded in the report and dropped from the index; they never
/// appear in any signature group and are never moved or deleted. A listing
/// failure yields an empty index with the error recorded in the report.
pub fn sign_directory(
    pool: &rayon::ThreadPool,
    provider: &dyn SignatureProvider,
    directory: &Path,
) -> (DirectoryIndex, DirectoryReport) {
    let mut report = DirectoryReport::new(directory);

    let candidates = match list_candidates(directory) {
        Ok(candidates) => candidates,
        Err(err) => {
            log::warn!("{err}");
            report.scan_error = Some(err);
            return (DirectoryIndex::new(), report);
        }
    };
    report.candidates = candidates.len();

    // Each task gets its own input path and reports back over the channel;
    // the channel drain below sees results in completion order.
    let (tx, rx) = mpsc::channel();
    pool.install(|| {
        candidates.into_par_iter().for_each_with(tx, |tx, path| {
            let outcome = provider.sign(&path);
            // send only fails if the receiver is gone
            let _ = tx.send((path, outcome));
        });
    });

    let mut index = DirectoryIndex::new();
    for (path, outcome) in rx {
        match outcome {
            Ok(signature) => {
                report.signed += 1;
                index
                    .entry(signature)
                    .or_default()
                    .push(ImageRecord::new(path, directory));
            }
            Err(error) => {
                log::info!("skipping candidate: {error}");
                report.failures.push(ItemFailure { path, error });
            }
        }
    }

    log::debug!(
        "{}: {} of {} candidate(s) signed",
        directory.display(),
        report.signed,
        report.candidates
    );
    (index, report)
}
