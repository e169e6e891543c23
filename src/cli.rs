//! Command-line interface definitions for imgsweep.
//!
//! All arguments are defined with the clap derive API. The surface is
//! intentionally flat: two or more positional directories, an optional
//! output directory, a concurrency limit and a verbosity level.
//!
//! # Example
//!
//! ```bash
//! # Deduplicate two directories, keeping unique images in photos/
//! imgsweep photos/ downloads/
//!
//! # Collect unique images into a third directory
//! imgsweep photos/ downloads/ backup/ -o unique/
//!
//! # More parallelism, more logging
//! imgsweep photos/ downloads/ -j 16 -v 4
//! ```

use clap::Parser;
use std::path::PathBuf;

/// Removes duplicate images spread across two or more directories.
///
/// Every image is fingerprinted by content, images with matching
/// fingerprints are grouped, and exactly one copy per group is kept in
/// the output directory while the rest are deleted.
#[derive(Debug, Parser)]
#[command(name = "imgsweep")]
#[command(author, version, about)]
#[command(
    long_about = "Removes duplicate images spread across two or more directories.\n\
                  Every image is fingerprinted by content, images with matching\n\
                  fingerprints are grouped, and exactly one copy per group is kept\n\
                  in the output directory while the rest are deleted.\n\n\
                  WARNING: after deduplication, every source directory other than\n\
                  the output directory is removed entirely, including any files\n\
                  that were not recognized as images."
)]
pub struct Cli {
    /// Main directory (may contain images). Used as the output directory
    /// when no output directory is supplied.
    #[arg(value_name = "MAIN_DIRECTORY")]
    pub main_directory: PathBuf,

    /// Directories containing images to compare. At least one is required.
    #[arg(value_name = "DIRECTORIES", required = true, num_args = 1..)]
    pub directories: Vec<PathBuf>,

    /// Output directory that will contain all unique images. May be one of
    /// the input directories. Created if absent.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Number of concurrent fingerprint computations and file operations.
    #[arg(short, long, value_name = "N", default_value_t = 8)]
    pub jobs: usize,

    /// Verbosity: 0 disables logging, 1-5 show increasingly more detail.
    #[arg(
        short,
        long,
        value_name = "LEVEL",
        default_value_t = 0,
        value_parser = clap::value_parser!(u8).range(0..=5)
    )]
    pub verbosity: u8,
}
