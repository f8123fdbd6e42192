//! Ancestry walks over the mirror

use git2::{Oid, Repository, Sort};

use crate::snapshot::CommitRef;
use crate::Result;

/// Commits reachable from `from` but not from `excluding`, newest first
pub fn unique_ancestry(repo: &Repository, from: Oid, excluding: Oid) -> Result<Vec<CommitRef>> {
    let mut walk = repo.revwalk()?;
    walk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;
    walk.push(from)?;
    walk.hide(excluding)?;

    let mut commits = Vec::new();
    for oid in walk {
        let commit = repo.find_commit(oid?)?;
        commits.push(CommitRef::from_commit(&commit));
    }
    Ok(commits)
}
