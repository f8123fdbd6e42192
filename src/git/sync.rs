//! Git sync operations for refwatch
//!
//! Brings the mirror's branches and tags in line with the remote.

use git2::{AutotagOption, FetchOptions, FetchPrune};
use tracing::{debug, info};

use super::{Repository, BRANCH_REFSPEC, TAG_REFSPEC};
use crate::{Error, Result};

impl Repository {
    /// Force-fetch every branch and tag from `url`, pruning refs the remote
    /// no longer has. A failure may leave the mirror partly updated.
    pub fn fetch_all(&self, url: &str) -> Result<()> {
        let fetch_error = |source: git2::Error| Error::FetchError {
            url: url.to_string(),
            source,
        };

        let mut remote = self.inner.remote_anonymous(url).map_err(fetch_error)?;

        let mut opts = FetchOptions::new();
        opts.download_tags(AutotagOption::All).prune(FetchPrune::On);

        info!(url, path = %self.path.display(), "Fetching all refs");
        remote
            .fetch(&[BRANCH_REFSPEC, TAG_REFSPEC], Some(&mut opts), None)
            .map_err(fetch_error)?;

        let stats = remote.stats();
        debug!(
            received_objects = stats.received_objects(),
            received_bytes = stats.received_bytes(),
            "Fetch complete"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::History;
    use crate::git::tests::{commit_file, remote_with_main};
    use tempfile::TempDir;

    #[test]
    fn test_fetch_picks_up_new_commits_and_refs() {
        let (remote_dir, remote, _) = remote_with_main();
        let url = remote_dir.path().to_str().unwrap();
        let mirror_dir = TempDir::new().unwrap();
        let mirror = Repository::open_or_clone(url, &mirror_dir.path().join("m")).unwrap();

        let c2 = commit_file(&remote, "main", "README.md", "hello again\n", "Second", 200);
        let c2_commit = remote.find_commit(c2).unwrap();
        remote.branch("feature", &c2_commit, false).unwrap();
        remote.tag_lightweight("v2", c2_commit.as_object(), false).unwrap();

        mirror.fetch_all(url).unwrap();

        let branches = mirror.branches().unwrap();
        let main = branches.iter().find(|(n, _)| n == "main").unwrap();
        assert_eq!(main.1.sha, c2.to_string());
        assert!(branches.iter().any(|(n, _)| n == "feature"));
        assert!(mirror.tags().unwrap().iter().any(|(n, _)| n == "v2"));
    }

    #[test]
    fn test_fetch_overwrites_rewritten_history() {
        let (remote_dir, remote, c1) = remote_with_main();
        let url = remote_dir.path().to_str().unwrap();
        let mirror_dir = TempDir::new().unwrap();

        commit_file(&remote, "main", "README.md", "v2\n", "Second", 200);
        let mirror = Repository::open_or_clone(url, &mirror_dir.path().join("m")).unwrap();

        // Force-push equivalent: reset main back and commit something else
        remote
            .reference("refs/heads/main", c1, true, "rewind")
            .unwrap();
        let rewritten = commit_file(&remote, "main", "OTHER.md", "x\n", "Rewritten", 300);

        mirror.fetch_all(url).unwrap();
        let branches = mirror.branches().unwrap();
        assert_eq!(branches[0].1.sha, rewritten.to_string());
    }

    #[test]
    fn test_fetch_prunes_deleted_branches() {
        let (remote_dir, remote, c1) = remote_with_main();
        let c1_commit = remote.find_commit(c1).unwrap();
        remote.branch("doomed", &c1_commit, false).unwrap();

        let url = remote_dir.path().to_str().unwrap();
        let mirror_dir = TempDir::new().unwrap();
        let mirror = Repository::open_or_clone(url, &mirror_dir.path().join("m")).unwrap();
        mirror.fetch_all(url).unwrap();
        assert_eq!(mirror.branches().unwrap().len(), 2);

        remote.find_reference("refs/heads/doomed").unwrap().delete().unwrap();
        mirror.fetch_all(url).unwrap();

        let names: Vec<String> = mirror.branches().unwrap().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["main".to_string()]);
    }

    #[test]
    fn test_fetch_from_missing_remote() {
        let (remote_dir, _remote, _) = remote_with_main();
        let url = remote_dir.path().to_str().unwrap().to_string();
        let mirror_dir = TempDir::new().unwrap();
        let mirror = Repository::open_or_clone(&url, &mirror_dir.path().join("m")).unwrap();

        drop(remote_dir);
        assert!(matches!(mirror.fetch_all(&url), Err(Error::FetchError { .. })));
    }
}
