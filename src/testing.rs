//! In-memory history used by unit tests

use std::collections::{HashMap, HashSet};

use chrono::DateTime;

use crate::backend::{DiffStats, History};
use crate::snapshot::{Author, CommitRef};
use crate::{Error, Result};

/// Build a commit with a fixed author and a timestamp in seconds
pub fn commit(sha: &str, seconds: i64) -> CommitRef {
    CommitRef::new(
        sha,
        format!("commit {sha}"),
        Author {
            name: "Tester".into(),
            email: "tester@example.com".into(),
        },
        DateTime::from_timestamp(seconds, 0).unwrap(),
    )
}

/// A commit graph plus branch and tag lists
#[derive(Debug, Default, Clone)]
pub struct FakeHistory {
    commits: HashMap<String, (CommitRef, Vec<String>)>,
    pub branches: Vec<(String, CommitRef)>,
    pub tags: Vec<(String, CommitRef)>,
}

impl FakeHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a commit with its parents
    pub fn add(&mut self, commit: &CommitRef, parents: &[&CommitRef]) -> &mut Self {
        self.commits.insert(
            commit.sha.clone(),
            (commit.clone(), parents.iter().map(|p| p.sha.clone()).collect()),
        );
        self
    }

    pub fn branch(&mut self, name: &str, head: &CommitRef) -> &mut Self {
        self.branches.retain(|(n, _)| n != name);
        self.branches.push((name.to_string(), head.clone()));
        self
    }

    pub fn tag(&mut self, name: &str, target: &CommitRef) -> &mut Self {
        self.tags.retain(|(n, _)| n != name);
        self.tags.push((name.to_string(), target.clone()));
        self
    }

    fn ancestors(&self, sha: &str) -> Result<HashSet<String>> {
        let mut seen = HashSet::new();
        let mut stack = vec![sha.to_string()];
        while let Some(next) = stack.pop() {
            if !seen.insert(next.clone()) {
                continue;
            }
            let (_, parents) = self
                .commits
                .get(&next)
                .ok_or_else(|| Error::CommitNotFound { sha: next.clone() })?;
            stack.extend(parents.iter().cloned());
        }
        Ok(seen)
    }
}

impl History for FakeHistory {
    fn branches(&self) -> Result<Vec<(String, CommitRef)>> {
        Ok(self.branches.clone())
    }

    fn tags(&self) -> Result<Vec<(String, CommitRef)>> {
        Ok(self.tags.clone())
    }

    /// One line inserted per commit between the two
    fn diff_stats(&self, from: &CommitRef, to: &CommitRef) -> Result<DiffStats> {
        let mut stats = DiffStats::zero();
        for commit in self.ancestry_window(to, from)? {
            stats.record(format!("{}.txt", commit.sha), 1, 0);
        }
        Ok(stats)
    }

    fn ancestry_window(&self, from: &CommitRef, excluding: &CommitRef) -> Result<Vec<CommitRef>> {
        let hidden = self.ancestors(&excluding.sha)?;
        let mut window: Vec<CommitRef> = self
            .ancestors(&from.sha)?
            .into_iter()
            .filter(|sha| !hidden.contains(sha))
            .filter_map(|sha| self.commits.get(&sha).map(|(c, _)| c.clone()))
            .collect();
        window.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(window)
    }
}
