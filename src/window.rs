//! Commit windows
//!
//! The commits one ref gained between two observations.

use crate::backend::History;
use crate::snapshot::CommitRef;
use crate::Result;

/// Commits introduced between `before` and `after`, most recent first.
///
/// - No `after`, or `after` is the same commit: just `before` (possibly empty)
/// - No `before`: just `after`
/// - Otherwise: the ancestry of `after` minus `before` and its ancestors
pub fn window<H: History + ?Sized>(
    history: &H,
    before: Option<&CommitRef>,
    after: Option<&CommitRef>,
) -> Result<Vec<CommitRef>> {
    match (before, after) {
        (before, None) => Ok(before.cloned().into_iter().collect()),
        (Some(before), Some(after)) if before.same_as(after) => Ok(vec![before.clone()]),
        (None, Some(after)) => Ok(vec![after.clone()]),
        (Some(before), Some(after)) => history.ancestry_window(after, before),
    }
}
