//! Run configuration: validation and directory processing order.
//!
//! [`Settings`] captures what the caller asked for; [`Settings::resolve`]
//! validates it and fixes the directory processing order, producing the
//! [`RunPlan`] every later phase works from.

use std::path::PathBuf;

use crate::cli::Cli;
use crate::error::ConfigError;

/// Unvalidated runtime settings, assembled from the CLI or by a library
/// caller.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Main directory; doubles as the output directory when `output` is
    /// not set.
    pub main_directory: PathBuf,
    /// Additional directories to compare against.
    pub directories: Vec<PathBuf>,
    /// Optional explicit output directory.
    pub output: Option<PathBuf>,
    /// Concurrency limit for fingerprinting and file operations.
    pub jobs: usize,
    /// Overwrite existing files in the output directory instead of
    /// renaming the incoming file on a name collision.
    pub replace: bool,
}

impl Settings {
    /// Build settings from parsed CLI arguments.
    #[must_use]
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            main_directory: cli.main_directory.clone(),
            directories: cli.directories.clone(),
            output: cli.output.clone(),
            jobs: cli.jobs,
            replace: false,
        }
    }

    /// Validate the settings and resolve the directory processing order.
    ///
    /// Every supplied directory must exist. The resolved output directory
    /// (explicit, or the main directory) is placed first in the processing
    /// order when it is not already among the inputs, followed by the main
    /// directory and then the remaining directories in caller order. No
    /// filesystem mutation happens here.
    ///
    /// # Errors
    ///
    /// [`ConfigError::NotEnoughDirectories`] when no comparison directory
    /// was supplied, [`ConfigError::MissingDirectory`] when a supplied
    /// directory does not exist.
    pub fn resolve(self) -> Result<RunPlan, ConfigError> {
        if self.directories.is_empty() {
            return Err(ConfigError::NotEnoughDirectories);
        }

        let mut directories = Vec::with_capacity(self.directories.len() + 2);
        directories.push(self.main_directory.clone());
        directories.extend(self.directories);

        for directory in &directories {
            if !directory.is_dir() {
                return Err(ConfigError::MissingDirectory(directory.clone()));
            }
        }

        let output = match self.output {
            Some(output) => output,
            None => {
                log::debug!(
                    "using main directory as output directory: {}",
                    self.main_directory.display()
                );
                self.main_directory
            }
        };

        // The output directory is scanned too, so images already there win
        // their groups; it is not required to exist yet.
        if !directories.contains(&output) {
            directories.insert(0, output.clone());
        }

        Ok(RunPlan {
            directories,
            output,
            jobs: self.jobs.max(1),
            replace: self.replace,
        })
    }
}

/// Validated plan for one deduplication run.
#[derive(Debug, Clone)]
pub struct RunPlan {
    /// All directories in processing order: resolved output directory
    /// first (when not otherwise among the inputs), then the main
    /// directory, then the rest in caller order.
    pub directories: Vec<PathBuf>,
    /// Resolved output directory.
    pub output: PathBuf,
    /// Concurrency limit, at least 1.
    pub jobs: usize,
    /// Overwrite on name collisions during the move phase.
    pub replace: bool,
}
