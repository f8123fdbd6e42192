//! Git backend for refwatch
//!
//! Keeps a bare, metadata-only mirror of the tracked remote on disk and
//! answers [`History`] queries from it.
//!
//! # Mirror Model
//!
//! 1. **Acquire**: open the mirror at the configured path, or clone the
//!    remote into it when the path is missing or empty.
//! 2. **Sync**: force-fetch every branch and tag so local refs always match
//!    the remote. Pruning drops refs the remote deleted.
//!
//! The path is the mirror's only identity. Two runs against the same path
//! must not overlap; callers serialize them.

use git2::{BranchType, Oid, Repository as Git2Repo};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

mod diff;
mod log;
mod sync;

use crate::backend::{DiffStats, History};
use crate::snapshot::CommitRef;
use crate::{Error, Result};

/// Refspec mapping remote branches onto local branches
pub const BRANCH_REFSPEC: &str = "+refs/heads/*:refs/heads/*";

/// Refspec mapping remote tags onto local tags
pub const TAG_REFSPEC: &str = "+refs/tags/*:refs/tags/*";

/// A bare mirror of one remote repository
pub struct Repository {
    inner: Git2Repo,
    path: PathBuf,
}

impl Repository {
    /// Open the mirror at `path`, cloning `url` into it if there is none yet
    pub fn open_or_clone(url: &str, path: &Path) -> Result<Self> {
        if Self::is_vacant(path)? {
            return Self::clone_bare(url, path);
        }

        Self::open(path)
    }

    /// Open an existing mirror without touching the network
    pub fn open(path: &Path) -> Result<Self> {
        let inner = Git2Repo::open(path).map_err(|err| Error::InvalidLocalPath {
            path: path.to_path_buf(),
            reason: format!("not a git repository ({})", err.message()),
        })?;

        debug!(path = %path.display(), "Opened existing mirror");
        Ok(Self {
            inner,
            path: path.to_path_buf(),
        })
    }

    /// Missing, or an empty directory
    fn is_vacant(path: &Path) -> Result<bool> {
        if !path.exists() {
            return Ok(true);
        }
        if !path.is_dir() {
            return Err(Error::InvalidLocalPath {
                path: path.to_path_buf(),
                reason: "exists and is not a directory".to_string(),
            });
        }
        let mut entries = std::fs::read_dir(path).map_err(|err| Error::InvalidLocalPath {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })?;
        Ok(entries.next().is_none())
    }

    /// Bare clone whose branches land in `refs/heads/*` rather than
    /// remote-tracking refs
    fn clone_bare(url: &str, path: &Path) -> Result<Self> {
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() && !parent.is_dir() => {
                return Err(Error::InvalidLocalPath {
                    path: path.to_path_buf(),
                    reason: format!("parent directory '{}' does not exist", parent.display()),
                });
            }
            _ => {}
        }

        let created = !path.exists();
        info!(url, path = %path.display(), "Cloning mirror");

        let mut fetch_options = git2::FetchOptions::new();
        fetch_options.download_tags(git2::AutotagOption::All);

        let result = git2::build::RepoBuilder::new()
            .bare(true)
            .fetch_options(fetch_options)
            .remote_create(|repo, name, url| repo.remote_with_fetch(name, url, BRANCH_REFSPEC))
            .clone(url, path);

        match result {
            Ok(inner) => Ok(Self {
                inner,
                path: path.to_path_buf(),
            }),
            Err(source) => {
                if created && path.exists() {
                    // Leave nothing half-cloned behind for the next run to open
                    let _ = std::fs::remove_dir_all(path);
                }
                Err(Error::RemoteUnreachable {
                    url: url.to_string(),
                    source,
                })
            }
        }
    }

    /// Location of the mirror on disk
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Look up a commit by sha
    fn find_commit(&self, sha: &str) -> Result<git2::Commit<'_>> {
        let oid = Oid::from_str(sha).map_err(|_| Error::CommitNotFound {
            sha: sha.to_string(),
        })?;
        self.inner.find_commit(oid).map_err(|err| match err.code() {
            git2::ErrorCode::NotFound => Error::CommitNotFound {
                sha: sha.to_string(),
            },
            _ => err.into(),
        })
    }

    /// Get the underlying git2 repository (for advanced operations)
    pub fn inner(&self) -> &Git2Repo {
        &self.inner
    }
}

impl History for Repository {
    fn branches(&self) -> Result<Vec<(String, CommitRef)>> {
        let mut branches = Vec::new();
        for entry in self.inner.branches(Some(BranchType::Local))? {
            let (branch, _) = entry?;
            let Some(name) = branch.name()?.map(str::to_string) else {
                debug!("Skipping branch with non-UTF-8 name");
                continue;
            };
            let head = branch.get().peel_to_commit()?;
            branches.push((name, CommitRef::from_commit(&head)));
        }
        Ok(branches)
    }

    fn tags(&self) -> Result<Vec<(String, CommitRef)>> {
        let mut tags = Vec::new();
        for reference in self.inner.references_glob("refs/tags/*")? {
            let reference = reference?;
            let Some(name) = reference.shorthand().map(str::to_string) else {
                continue;
            };
            match reference.peel_to_commit() {
                Ok(target) => tags.push((name, CommitRef::from_commit(&target))),
                Err(err) => debug!(tag = %name, error = %err, "Skipping tag that does not point at a commit"),
            }
        }
        Ok(tags)
    }

    fn diff_stats(&self, from: &CommitRef, to: &CommitRef) -> Result<DiffStats> {
        let from = self.find_commit(&from.sha)?;
        let to = self.find_commit(&to.sha)?;
        diff::between(&self.inner, &from, &to)
    }

    fn ancestry_window(&self, from: &CommitRef, excluding: &CommitRef) -> Result<Vec<CommitRef>> {
        let from = self.find_commit(&from.sha)?;
        let excluding = self.find_commit(&excluding.sha)?;
        log::unique_ancestry(&self.inner, from.id(), excluding.id())
    }
}
