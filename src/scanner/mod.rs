//! Directory scanning and image fingerprinting.
//!
//! The scanner is divided into submodules:
//! - [`lister`]: immediate (non-recursive) candidate discovery
//! - [`perceptual`]: the signature provider built on perceptual hashing
//! - [`signer`]: bounded-concurrency fingerprinting of one directory
//!
//! # Example
//!
//! ```no_run
//! use imgsweep::scanner::{sign_directory, PerceptualSigner};
//! use std::path::Path;
//!
//! let pool = rayon::ThreadPoolBuilder::new().num_threads(8).build().unwrap();
//! let signer = PerceptualSigner::default();
//! let (index, report) = sign_directory(&pool, &signer, Path::new("photos"));
//! println!("{} images signed, {} skipped", report.signed, report.failures.len());
//! # let _ = index;
//! ```

pub mod lister;
pub mod perceptual;
pub mod signer;

use std::path::{Path, PathBuf};

// Re-export main types
pub use lister::list_candidates;
pub use perceptual::{PerceptualSigner, SignError, Signature, SignatureProvider};
pub use signer::{sign_directory, DirectoryIndex, DirectoryReport, ItemFailure};

/// A candidate image discovered in a scanned directory.
///
/// Identity is the path; records are immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRecord {
    /// Path to the candidate file.
    pub path: PathBuf,
    /// The scanned directory this candidate belongs to.
    pub directory: PathBuf,
}

impl ImageRecord {
    /// Create a new record for a candidate found in `directory`.
    #[must_use]
    pub fn new(path: PathBuf, directory: &Path) -> Self {
        Self {
            path,
            directory: directory.to_path_buf(),
        }
    }
}

/// Errors raised while listing a directory's candidates.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    /// The directory could not be read.
    #[error("failed to read directory {path}: {source}")]
    ReadDir {
        /// Directory that failed to list
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}
