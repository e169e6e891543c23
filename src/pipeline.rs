//! Orchestration of the deduplication phases.
//!
//! Phase order: validation (performed by
//! [`Settings::resolve`](crate::config::Settings::resolve)) →
//! scan+fingerprint (one task per directory, in parallel) → merge → plan
//! → move → delete → directory cleanup. The orchestrator owns the single
//! bounded worker pool and passes it to every phase, so total concurrency
//! is bounded by the configured job count across the whole run.
//!
//! All shared state (the signature index, the reconciliation plan) is
//! built and consumed single-threaded between fan-out phases; concurrency
//! only touches independent per-task state, joined at a barrier before
//! the next phase starts.

use std::fs;
use std::time::{Duration, Instant};

use anyhow::Context;
use rayon::prelude::*;

use crate::actions::{
    cleanup_directories, execute_deletes, execute_moves, CleanupReport, DeleteReport, MoveReport,
};
use crate::config::RunPlan;
use crate::duplicates::{build_plan, SignatureIndex};
use crate::scanner::{sign_directory, DirectoryReport, PerceptualSigner, SignatureProvider};

/// Aggregated outcome of a full run.
///
/// Per-item failures are carried here as values rather than only logged;
/// they never change the process exit code.
#[derive(Debug)]
pub struct RunReport {
    /// Per-directory scan and signing outcomes, in processing order.
    pub directories: Vec<DirectoryReport>,
    /// Number of signature groups in the merged index.
    pub groups: usize,
    /// Number of groups that contained duplicates.
    pub duplicate_groups: usize,
    /// Move phase outcome.
    pub moves: MoveReport,
    /// Delete phase outcome.
    pub deletes: DeleteReport,
    /// Cleanup phase outcome.
    pub cleanup: CleanupReport,
    /// Wall-clock duration of the run.
    pub elapsed: Duration,
}

impl RunReport {
    /// Total candidates successfully signed across all directories.
    #[must_use]
    pub fn signed(&self) -> usize {
        self.directories.iter().map(|report| report.signed).sum()
    }

    /// Total per-item failures across the signing, move and delete phases.
    #[must_use]
    pub fn item_failures(&self) -> usize {
        let signing: usize = self
            .directories
            .iter()
            .map(|report| report.failures.len())
            .sum();
        signing + self.moves.failures.len() + self.deletes.failures.len()
    }

    /// Human-readable one-line summary.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "{} image(s) in {} group(s) ({} with duplicates); moved {}, deleted {}, removed {} director(ies), {} item failure(s)",
            self.signed(),
            self.groups,
            self.duplicate_groups,
            self.moves.moved.len(),
            self.deletes.deleted,
            self.cleanup.removed.len(),
            self.item_failures()
        )
    }
}

/// Run the full pipeline with the default perceptual signature provider.
///
/// # Errors
///
/// Fails when the output directory cannot be created, the worker pool
/// cannot be built, or a source directory cannot be removed during
/// cleanup. Per-item failures do not surface here.
pub fn run(plan: &RunPlan) -> anyhow::Result<RunReport> {
    run_with_provider(plan, &PerceptualSigner::default())
}

/// Run the full pipeline with a caller-supplied signature provider.
pub fn run_with_provider(
    plan: &RunPlan,
    provider: &dyn SignatureProvider,
) -> anyhow::Result<RunReport> {
    let started = Instant::now();

    if !plan.output.exists() {
        fs::create_dir_all(&plan.output).with_context(|| {
            format!(
                "failed to create output directory {}",
                plan.output.display()
            )
        })?;
        log::debug!("created output directory: {}", plan.output.display());
    }

    // One bounded pool for the whole run, shared by every phase.
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(plan.jobs)
        .build()
        .context("failed to build worker pool")?;

    // One task per directory; collect() preserves the directory processing
    // order for the merge even though tasks complete out of order.
    let per_directory: Vec<_> = pool.install(|| {
        plan.directories
            .par_iter()
            .map(|directory| sign_directory(&pool, provider, directory))
            .collect()
    });

    // Sequential merge in processing order; no lock needed.
    let mut index = SignatureIndex::new();
    let mut directories = Vec::with_capacity(per_directory.len());
    for (directory_index, report) in per_directory {
        index.absorb(directory_index);
        directories.push(report);
    }
    log::info!(
        "{} signature group(s), {} with duplicates",
        index.len(),
        index.duplicate_groups()
    );
    let groups = index.len();
    let duplicate_groups = index.duplicate_groups();

    let recon = build_plan(&index, &plan.output);

    log::info!(
        "moving image files to output directory: {}",
        plan.output.display()
    );
    let moves = execute_moves(&pool, &recon.moves, &plan.output, plan.replace);

    log::info!("removing duplicate image files");
    let deletes = execute_deletes(&pool, &recon.deletes);

    log::info!("removing source directories");
    let cleanup = cleanup_directories(&plan.directories, &plan.output)?;

    let report = RunReport {
        directories,
        groups,
        duplicate_groups,
        moves,
        deletes,
        cleanup,
        elapsed: started.elapsed(),
    };
    log::info!("{}", report.summary());
    log::debug!("elapsed time: {:.2?}", report.elapsed);
    Ok(report)
}
