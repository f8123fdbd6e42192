//! The version-control seam
//!
//! Snapshotting, commit windows and report assembly only ever talk to a
//! [`History`]. The git2 mirror in [`crate::git`] is the production
//! implementation.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::snapshot::CommitRef;
use crate::Result;

/// Read access to a repository's refs and commit graph
pub trait History {
    /// Every branch with its head commit, in backend order
    fn branches(&self) -> Result<Vec<(String, CommitRef)>>;

    /// Every tag with the commit it resolves to, in backend order
    fn tags(&self) -> Result<Vec<(String, CommitRef)>>;

    /// Line and file statistics for the change from `from` to `to`
    fn diff_stats(&self, from: &CommitRef, to: &CommitRef) -> Result<DiffStats>;

    /// Commits reachable from `from` that are not reachable from
    /// `excluding`, most recent first
    fn ancestry_window(&self, from: &CommitRef, excluding: &CommitRef) -> Result<Vec<CommitRef>>;
}

/// Counts for a single file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileStats {
    pub insertions: usize,
    pub deletions: usize,
    pub lines: usize,
}

/// Counts for a whole diff
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffTotals {
    pub insertions: usize,
    pub deletions: usize,
    pub lines: usize,
    pub files: usize,
}

/// Diff statistics between two commits
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffStats {
    pub total: DiffTotals,
    pub per_file: BTreeMap<String, FileStats>,
}

impl DiffStats {
    /// All-zero stats, used when there is nothing to compare
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn is_zero(&self) -> bool {
        self.total == DiffTotals::default() && self.per_file.is_empty()
    }

    /// Add one file's counts, keeping the totals in step
    pub fn record(&mut self, path: impl Into<String>, insertions: usize, deletions: usize) {
        let stats = self.per_file.entry(path.into()).or_default();
        stats.insertions += insertions;
        stats.deletions += deletions;
        stats.lines = stats.insertions + stats.deletions;

        self.total.insertions += insertions;
        self.total.deletions += deletions;
        self.total.lines = self.total.insertions + self.total.deletions;
        self.total.files = self.per_file.len();
    }
}
