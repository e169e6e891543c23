//! Configuration errors and process exit codes.

use std::path::PathBuf;

use thiserror::Error;

/// Exit codes for the imgsweep binary.
///
/// - 0: deduplication completed (per-item failures do not change this)
/// - 1: an unexpected error aborted the run partway through
/// - -1: fewer than two directories were supplied
/// - -2: a supplied directory does not exist
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// The run completed.
    Success = 0,
    /// An unexpected error occurred after validation.
    GeneralError = 1,
    /// Not enough directory arguments.
    UsageError = -1,
    /// A supplied directory does not exist.
    MissingDirectory = -2,
}

impl ExitCode {
    /// Get the numeric exit code.
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

/// Fatal configuration problems, detected before any scanning.
///
/// A `ConfigError` aborts the whole run without touching the filesystem.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Fewer than two directories were supplied.
    #[error("not enough directories: a main directory and at least one more are required")]
    NotEnoughDirectories,

    /// A supplied path is not a directory or does not exist.
    #[error("path {0} is not a directory or doesn't exist")]
    MissingDirectory(PathBuf),
}

impl ConfigError {
    /// The exit code this error maps to.
    #[must_use]
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::NotEnoughDirectories => ExitCode::UsageError,
            Self::MissingDirectory(_) => ExitCode::MissingDirectory,
        }
    }
}
