//! Global signature index merged across directories.

use std::collections::HashMap;

use crate::scanner::{DirectoryIndex, ImageRecord, Signature};

/// Signature -> records map covering every scanned directory.
///
/// Built by absorbing per-directory maps one at a time, after all
/// directory tasks have completed. Within each group the records of
/// earlier-absorbed directories come first, so cross-directory order is
/// exactly the directory processing order; order within one directory's
/// contribution is the (nondeterministic) signing completion order.
#[derive(Debug, Default)]
pub struct SignatureIndex {
    groups: HashMap<Signature, Vec<ImageRecord>>,
}

impl SignatureIndex {
    /// Create an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one directory's map to the index.
    ///
    /// Call once per directory, in processing order. Runs single-threaded
    /// between fan-out phases, so there is no shared-mutation hazard.
    pub fn absorb(&mut self, directory_index: DirectoryIndex) {
        for (signature, records) in directory_index {
            self.groups.entry(signature).or_default().extend(records);
        }
    }

    /// Merge per-directory maps in iteration order.
    #[must_use]
    pub fn merge(indexes: impl IntoIterator<Item = DirectoryIndex>) -> Self {
        let mut index = Self::new();
        for directory_index in indexes {
            index.absorb(directory_index);
        }
        index
    }

    /// Iterate over all signature groups.
    pub fn groups(&self) -> impl Iterator<Item = (&Signature, &[ImageRecord])> {
        self.groups
            .iter()
            .map(|(signature, records)| (signature, records.as_slice()))
    }

    /// Number of signature groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether the index has no groups.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total records across all groups.
    #[must_use]
    pub fn total_records(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    /// Number of groups with more than one record.
    #[must_use]
    pub fn duplicate_groups(&self) -> usize {
        self.groups.values().filter(|records| records.len() > 1).count()
    }
}
