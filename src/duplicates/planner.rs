//! Reconciliation planning: move one, delete the rest.

use std::path::Path;

use super::SignatureIndex;
use crate::scanner::ImageRecord;

/// Transient plan derived from the signature index.
#[derive(Debug, Default, Clone)]
pub struct ReconcilePlan {
    /// Records to move into the output directory.
    pub moves: Vec<ImageRecord>,
    /// Records to delete.
    pub deletes: Vec<ImageRecord>,
}

impl ReconcilePlan {
    /// Whether the plan schedules no work at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty() && self.deletes.is_empty()
    }
}

/// Build the reconciliation plan for every signature group.
///
/// The keep record is always the first element of the group's list,
/// regardless of which directory it resides in. When it does not already
/// live in the output directory it is scheduled for a move; every later
/// record is scheduled for deletion unconditionally, including records
/// that live in the output directory itself.
///
/// The selection is purely positional: it does not search the group for a
/// member already resident in the output directory. When the keep record
/// is elsewhere but a later member is already in the output directory,
/// that member is deleted and the keep record is moved in, which can
/// transiently duplicate content in the output directory until the
/// deletion completes.
///
/// A single-member group produces at most a move and never a deletion.
#[must_use]
pub fn build_plan(index: &SignatureIndex, output: &Path) -> ReconcilePlan {
    let mut plan = ReconcilePlan::default();

    for (_, records) in index.groups() {
        let Some((keep, rest)) = records.split_first() else {
            continue;
        };
        if keep.directory != output {
            plan.moves.push(keep.clone());
        }
        plan.deletes.extend(rest.iter().cloned());
    }

    log::debug!(
        "planned {} move(s) and {} deletion(s)",
        plan.moves.len(),
        plan.deletes.len()
    );
    plan
}
