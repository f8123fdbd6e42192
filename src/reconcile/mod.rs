//! Set reconciliation
//!
//! Matches two name-keyed collections (the branches or tags of a before and
//! an after snapshot) and sorts every name into added, removed or updated.
//!
//! # Matching rules
//!
//! - Names only in `after` are **added**. They are also surfaced as
//!   **updated**, merged with no before-state.
//! - Names only in `before` are **removed**.
//! - Names in both are **updated**: the before-entity merged with the first
//!   `after` entity of the same name.
//!
//! Duplicate names are not rejected. Matching is a linear scan that takes
//! the first entity with the name, so later duplicates never match.
//!
//! `updated` lists added entities first (in `after` order), then matched
//! entities (in `before` order).

mod branch;
mod tag;

pub use branch::{BranchReport, BranchUpdate};
pub use tag::TagUpdate;

use crate::snapshot::{BranchSnapshot, TagSnapshot};

/// An entity keyed by name within one snapshot
pub trait Named {
    fn name(&self) -> &str;
}

/// An entity whose before and after states can be merged
pub trait Reconcile: Named + Clone {
    /// The before-entity annotated with its after-state
    type Merged;

    /// Merge the after-state into the before-state. `before` is `None` for
    /// an entity that only exists in the later snapshot.
    fn merge(before: Option<&Self>, after: &Self) -> Self::Merged;
}

impl Named for BranchSnapshot {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for TagSnapshot {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Outcome of reconciling one kind of ref
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation<T: Reconcile> {
    pub added: Vec<T>,
    pub removed: Vec<T>,
    pub updated: Vec<T::Merged>,
}

impl<T: Reconcile> Reconciliation<T> {
    /// Membership churn only. A ref that moved but kept its name is in
    /// `updated` and does not count here.
    pub fn changed(&self) -> bool {
        !self.added.is_empty() || !self.removed.is_empty()
    }
}

fn find_by_name<'a, T: Named>(items: &'a [T], name: &str) -> Option<&'a T> {
    items.iter().find(|item| item.name() == name)
}

/// Reconcile two collections by name
pub fn reconcile<T: Reconcile>(before: &[T], after: &[T]) -> Reconciliation<T> {
    let mut added = Vec::new();
    let mut removed = Vec::new();
    let mut updated = Vec::new();

    for a in after {
        if find_by_name(before, a.name()).is_none() {
            added.push(a.clone());
            updated.push(T::merge(None, a));
        }
    }

    for b in before {
        match find_by_name(after, b.name()) {
            Some(a) => updated.push(T::merge(Some(b), a)),
            None => removed.push(b.clone()),
        }
    }

    Reconciliation {
        added,
        removed,
        updated,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::commit;
    use std::collections::BTreeSet;

    fn tags(entries: &[(&str, &str)]) -> Vec<TagSnapshot> {
        entries
            .iter()
            .map(|(name, sha)| TagSnapshot::new(*name, commit(sha, 100)))
            .collect()
    }

    fn names<T: Named>(items: &[T]) -> BTreeSet<String> {
        items.iter().map(|i| i.name().to_string()).collect()
    }

    #[test]
    fn test_partitions() {
        let before = tags(&[("a", "1"), ("b", "2"), ("c", "3")]);
        let after = tags(&[("b", "2"), ("c", "4"), ("d", "5")]);

        let result = reconcile(&before, &after);

        assert_eq!(names(&result.added), BTreeSet::from(["d".to_string()]));
        assert_eq!(names(&result.removed), BTreeSet::from(["a".to_string()]));

        let updated: BTreeSet<String> = result.updated.iter().map(|u| u.name.clone()).collect();
        assert_eq!(
            updated,
            BTreeSet::from(["b".to_string(), "c".to_string(), "d".to_string()])
        );
        assert!(result.changed());
    }

    #[test]
    fn test_added_and_removed_are_disjoint() {
        let before = tags(&[("x", "1"), ("y", "2")]);
        let after = tags(&[("y", "3"), ("z", "4")]);

        let result = reconcile(&before, &after);
        let added = names(&result.added);
        let removed = names(&result.removed);

        assert!(added.is_disjoint(&removed));
        let mut union = added.clone();
        union.extend(removed);
        union.extend(result.updated.iter().map(|u| u.name.clone()));
        let expected: BTreeSet<String> = ["x", "y", "z"].iter().map(|s| s.to_string()).collect();
        assert_eq!(union, expected);
    }

    #[test]
    fn test_updated_order_added_first() {
        let before = tags(&[("old", "1")]);
        let after = tags(&[("old", "1"), ("new", "2")]);

        let result = reconcile(&before, &after);
        let order: Vec<&str> = result.updated.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(order, vec!["new", "old"]);
    }

    #[test]
    fn test_moved_only_is_not_changed() {
        let before = tags(&[("v1", "1")]);
        let after = tags(&[("v1", "2")]);

        let result = reconcile(&before, &after);
        assert!(!result.changed());
        assert_eq!(result.updated.len(), 1);
        assert_eq!(result.updated[0].moved_to.as_deref(), Some("2"));
    }

    #[test]
    fn test_duplicate_names_match_first() {
        let before = tags(&[("v1", "1")]);
        let after = tags(&[("v1", "2"), ("v1", "3")]);

        let result = reconcile(&before, &after);
        assert!(result.added.is_empty());
        assert!(result.removed.is_empty());
        assert_eq!(result.updated.len(), 1);
        assert_eq!(result.updated[0].moved_to.as_deref(), Some("2"));
    }

    #[test]
    fn test_duplicate_before_names_each_merge_first_after() {
        let before = tags(&[("v1", "1"), ("v1", "2")]);
        let after = tags(&[("v1", "2"), ("v1", "3")]);

        let result = reconcile(&before, &after);
        assert!(result.added.is_empty());
        assert!(result.removed.is_empty());

        let merged: Vec<(&str, Option<&str>)> = result
            .updated
            .iter()
            .map(|u| (u.sha.as_str(), u.moved_to.as_deref()))
            .collect();
        assert_eq!(merged, vec![("1", Some("2")), ("2", None)]);
    }

    #[test]
    fn test_empty_collections() {
        let result = reconcile::<TagSnapshot>(&[], &[]);
        assert!(result.added.is_empty());
        assert!(result.removed.is_empty());
        assert!(result.updated.is_empty());
        assert!(!result.changed());
    }

    #[test]
    fn test_inputs_untouched() {
        let before = tags(&[("v1", "1")]);
        let after = tags(&[("v1", "2")]);
        let snapshot = (before.clone(), after.clone());

        let _ = reconcile(&before, &after);
        assert_eq!((before, after), snapshot);
    }
}
