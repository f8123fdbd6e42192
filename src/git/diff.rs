//! Diff statistics between two commits

use git2::{DiffOptions, Patch, Repository};
use tracing::debug;

use crate::backend::DiffStats;
use crate::Result;

/// Tree-to-tree line counts from `from` to `to`
pub fn between(repo: &Repository, from: &git2::Commit<'_>, to: &git2::Commit<'_>) -> Result<DiffStats> {
    let from_tree = from.tree()?;
    let to_tree = to.tree()?;

    let mut opts = DiffOptions::new();
    opts.ignore_submodules(true);

    let diff = repo.diff_tree_to_tree(Some(&from_tree), Some(&to_tree), Some(&mut opts))?;

    let mut stats = DiffStats::zero();
    for idx in 0..diff.deltas().count() {
        let Some(patch) = Patch::from_diff(&diff, idx)? else {
            continue;
        };
        let delta = patch.delta();
        let path = delta
            .new_file()
            .path()
            .or_else(|| delta.old_file().path())
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_default();

        let (_, insertions, deletions) = patch.line_stats()?;
        stats.record(path, insertions, deletions);
    }

    debug!(
        files = stats.total.files,
        insertions = stats.total.insertions,
        deletions = stats.total.deletions,
        "Computed diff stats"
    );

    Ok(stats)
}
