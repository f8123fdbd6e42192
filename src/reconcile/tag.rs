use serde::Serialize;

use super::{Named, Reconcile};
use crate::snapshot::TagSnapshot;

/// A tag as reported: its original target and, if it moved, the new one
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TagUpdate {
    /// Target in the earlier snapshot; never overwritten by a move
    pub sha: String,
    pub name: String,
    pub moved_to: Option<String>,
}

impl TagUpdate {
    /// A tag reported at its own target
    pub fn unmoved(tag: &TagSnapshot) -> Self {
        Self {
            sha: tag.target.sha.clone(),
            name: tag.name.clone(),
            moved_to: None,
        }
    }

    pub fn moved(&self) -> bool {
        self.moved_to.is_some()
    }
}

impl Reconcile for TagSnapshot {
    type Merged = TagUpdate;

    fn merge(before: Option<&Self>, after: &Self) -> TagUpdate {
        let Some(before) = before else {
            return TagUpdate::unmoved(after);
        };

        let moved_to = (before.name() == after.name() && !before.target.same_as(&after.target))
            .then(|| after.target.sha.clone());

        TagUpdate {
            sha: before.target.sha.clone(),
            name: before.name.clone(),
            moved_to,
        }
    }
}
