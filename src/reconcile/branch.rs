use serde::Serialize;

use super::Reconcile;
use crate::backend::{DiffStats, History};
use crate::snapshot::{BranchSnapshot, CommitRef};
use crate::window::window;
use crate::Result;

/// A branch merged across two snapshots.
///
/// `previous` is `None` for a branch that only exists in the later
/// snapshot; `head` is always the later head.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchUpdate {
    pub name: String,
    pub previous: Option<CommitRef>,
    pub head: CommitRef,
}

/// Wire form of a current branch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchReport {
    pub name: String,
    pub changed: bool,
    pub prev_last_commit: Option<CommitRef>,
    pub new_last_commit: CommitRef,
    pub log: Vec<CommitRef>,
    pub diff_stats: DiffStats,
}

impl BranchUpdate {
    /// True when the head moved or the branch is new
    pub fn changed(&self) -> bool {
        self.previous
            .as_ref()
            .map_or(true, |previous| !previous.same_as(&self.head))
    }

    /// Resolve the commit window and diff stats for this branch
    pub fn to_report<H: History + ?Sized>(&self, history: &H) -> Result<BranchReport> {
        let log = window(history, self.previous.as_ref(), Some(&self.head))?;

        let diff_stats = match &self.previous {
            Some(previous) if !previous.same_as(&self.head) => {
                history.diff_stats(previous, &self.head)?
            }
            _ => DiffStats::zero(),
        };

        Ok(BranchReport {
            name: self.name.clone(),
            changed: self.changed(),
            prev_last_commit: self.previous.clone(),
            new_last_commit: self.head.clone(),
            log,
            diff_stats,
        })
    }
}

impl Reconcile for BranchSnapshot {
    type Merged = BranchUpdate;

    fn merge(before: Option<&Self>, after: &Self) -> BranchUpdate {
        BranchUpdate {
            name: before.map_or_else(|| after.name.clone(), |b| b.name.clone()),
            previous: before.map(|b| b.head.clone()),
            head: after.head.clone(),
        }
    }
}
