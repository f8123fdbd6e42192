//! The change report
//!
//! [`Report`] is the payload handed to the event sink. Its field names and
//! nesting are the external wire contract:
//!
//! ```text
//! {changed, diffStats, currentTags[], newTags[], removedTags[],
//!  currentBranches[], newBranches[], removedBranches[], log[]}
//! ```
//!
//! Assembly is all-or-nothing: any backend failure while resolving commit
//! windows or diff stats fails the whole report.

use serde::Serialize;
use tracing::debug;

use crate::backend::{DiffStats, History};
use crate::reconcile::{reconcile, BranchReport, Reconciliation, TagUpdate};
use crate::snapshot::{BranchSnapshot, CommitRef, RepositorySnapshot, TagSnapshot};
use crate::window::window;
use crate::Result;

/// Everything that changed between two snapshots
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub changed: bool,
    pub diff_stats: DiffStats,
    pub current_tags: Vec<TagUpdate>,
    pub new_tags: Vec<TagUpdate>,
    pub removed_tags: Vec<TagUpdate>,
    pub current_branches: Vec<BranchReport>,
    pub new_branches: Vec<BranchSnapshot>,
    pub removed_branches: Vec<BranchSnapshot>,
    pub log: Vec<CommitRef>,
}

impl Report {
    /// Reconcile `before` against `after` and resolve every commit window
    /// and diff through `history`
    pub fn assemble<H: History + ?Sized>(
        history: &H,
        before: &RepositorySnapshot,
        after: &RepositorySnapshot,
    ) -> Result<Self> {
        let branches: Reconciliation<BranchSnapshot> = reconcile(&before.branches, &after.branches);
        let tags: Reconciliation<TagSnapshot> = reconcile(&before.tags, &after.tags);

        let before_latest = before.latest_commit();
        let after_latest = after.latest_commit();

        let latest_moved = before_latest.map(|c| c.sha.as_str()) != after_latest.map(|c| c.sha.as_str());
        let changed = latest_moved || branches.changed() || tags.changed();

        let diff_stats = match (before_latest, after_latest) {
            (Some(from), Some(to)) if !from.same_as(to) => history.diff_stats(from, to)?,
            _ => DiffStats::zero(),
        };

        let log = window(history, before_latest, after_latest)?;

        let current_branches = branches
            .updated
            .iter()
            .map(|update| update.to_report(history))
            .collect::<Result<Vec<_>>>()?;

        debug!(
            changed,
            new_branches = branches.added.len(),
            removed_branches = branches.removed.len(),
            new_tags = tags.added.len(),
            removed_tags = tags.removed.len(),
            log = log.len(),
            "Assembled report"
        );

        Ok(Self {
            changed,
            diff_stats,
            current_tags: tags.updated,
            new_tags: tags.added.iter().map(TagUpdate::unmoved).collect(),
            removed_tags: tags.removed.iter().map(TagUpdate::unmoved).collect(),
            current_branches,
            new_branches: branches.added,
            removed_branches: branches.removed,
            log,
        })
    }

    /// Tags whose name persisted but whose target changed
    pub fn moved_tags(&self) -> impl Iterator<Item = &TagUpdate> {
        self.current_tags.iter().filter(|t| t.moved())
    }

    /// Current branches whose head moved or that are new
    pub fn changed_branches(&self) -> impl Iterator<Item = &BranchReport> {
        self.current_branches.iter().filter(|b| b.changed)
    }
}
