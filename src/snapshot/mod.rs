//! Point-in-time views of a repository
//!
//! A [`RepositorySnapshot`] captures every branch head and tag target the
//! backend reports, plus the most recent branch head. Snapshots are never
//! mutated after capture; reconciliation builds new merged values instead.

mod commit;

pub use commit::{Author, CommitRef};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::backend::History;
use crate::Result;

/// A branch and the commit at its head
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchSnapshot {
    pub name: String,
    #[serde(rename = "lastCommit")]
    pub head: CommitRef,
}

/// A tag and the commit it points at
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagSnapshot {
    pub name: String,
    pub target: CommitRef,
}

impl BranchSnapshot {
    pub fn new(name: impl Into<String>, head: CommitRef) -> Self {
        Self {
            name: name.into(),
            head,
        }
    }
}

impl TagSnapshot {
    pub fn new(name: impl Into<String>, target: CommitRef) -> Self {
        Self {
            name: name.into(),
            target,
        }
    }
}

/// The observed state of a repository at one instant
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositorySnapshot {
    /// Branches in backend-reported order
    pub branches: Vec<BranchSnapshot>,
    /// Tags in backend-reported order
    pub tags: Vec<TagSnapshot>,
    latest_commit: Option<CommitRef>,
}

impl RepositorySnapshot {
    /// Build a snapshot from already-listed branches and tags
    pub fn new(branches: Vec<BranchSnapshot>, tags: Vec<TagSnapshot>) -> Self {
        let latest_commit = latest_head(&branches).cloned();
        Self {
            branches,
            tags,
            latest_commit,
        }
    }

    /// Capture the current state of a repository. Read-only with respect
    /// to the backend, so it can be called repeatedly on one handle.
    pub fn capture<H: History + ?Sized>(history: &H) -> Result<Self> {
        let branches = history
            .branches()?
            .into_iter()
            .map(|(name, head)| BranchSnapshot::new(name, head))
            .collect::<Vec<_>>();
        let tags = history
            .tags()?
            .into_iter()
            .map(|(name, target)| TagSnapshot::new(name, target))
            .collect::<Vec<_>>();

        debug!(branches = branches.len(), tags = tags.len(), "Captured snapshot");

        Ok(Self::new(branches, tags))
    }

    /// The branch head with the greatest timestamp. Ties go to the branch
    /// listed first, which depends on backend order.
    pub fn latest_commit(&self) -> Option<&CommitRef> {
        self.latest_commit.as_ref()
    }

    pub fn tag(&self, name: &str) -> Option<&TagSnapshot> {
        self.tags.iter().find(|t| t.name == name)
    }
}

fn latest_head(branches: &[BranchSnapshot]) -> Option<&CommitRef> {
    let mut latest: Option<&CommitRef> = None;
    for branch in branches {
        match latest {
            Some(current) if branch.head.timestamp <= current.timestamp => {}
            _ => latest = Some(&branch.head),
        }
    }
    latest
}
