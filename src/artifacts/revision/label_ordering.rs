//! Ordering revisions relative to a labeled revision
//!
//! Revisions of one file form a tree: a trunk plus branches forked from trunk (or branch)
//! revisions. Only two relationships are ordered here:
//!
//! - trunk against trunk, and branch against a trunk label through the branch's fork point
//! - two revisions of the same branch line
//!
//! Everything else, in particular two branches of equal depth with different lineage, is
//! incomparable and never reported as "after".

use crate::artifacts::revision::label::{Label, find_label};
use crate::artifacts::revision::revision_node::{RevisionMap, RevisionRef, find_revision};

/// Where a revision sits relative to the revision a label points at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelPosition {
    Before,
    Equal,
    After,
    Unrelated,
}

/// Outcome of looking a label up on one file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelTarget<'r> {
    /// No label with that name exists on the file
    Missing,
    /// The label exists but its revision is not in the file's revision map
    Unresolved,
    Found(RevisionRef<'r>),
}

pub fn locate_label<'r>(
    name: &str,
    labels: &[Label],
    revisions: &'r RevisionMap,
) -> LabelTarget<'r> {
    match find_label(labels, name) {
        None => LabelTarget::Missing,
        Some(label) => match find_revision(revisions, label.revision()) {
            Some(target) => LabelTarget::Found(target),
            None => LabelTarget::Unresolved,
        },
    }
}

/// Whether `candidate` comes after the labeled revision.
pub fn is_after(candidate: RevisionRef<'_>, labeled: RevisionRef<'_>) -> bool {
    if labeled.depth() == 0 {
        if candidate.depth() == 0 {
            // trunk revisions are stored in increasing order
            candidate.index > labeled.index
        } else {
            candidate.path().trunk_minor_number() >= labeled.path().trunk_minor_number()
        }
    } else {
        candidate.depth() == labeled.depth()
            && candidate.index > labeled.index
            && candidate.path().branch_path() == labeled.path().branch_path()
    }
}

pub fn classify(candidate: RevisionRef<'_>, labeled: RevisionRef<'_>) -> LabelPosition {
    if candidate.path() == labeled.path() {
        LabelPosition::Equal
    } else if is_after(candidate, labeled) {
        LabelPosition::After
    } else if candidate.path().is_ancestor_of(labeled.path()) {
        LabelPosition::Before
    } else {
        LabelPosition::Unrelated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::revision::revision_node::{RevisionNode, revision_map};
    use crate::artifacts::revision::revision_path::RevisionPath;
    use chrono::{TimeZone, Utc};
    use proptest::prelude::*;
    use rstest::{fixture, rstest};

    fn node(path: &str) -> RevisionNode {
        RevisionNode::new(
            RevisionPath::try_parse(path).unwrap(),
            Utc.timestamp_opt(1_600_000_000, 0).unwrap(),
            "alice".to_string(),
        )
    }

    fn at<'r>(revisions: &'r RevisionMap, path: &str) -> RevisionRef<'r> {
        find_revision(revisions, &RevisionPath::try_parse(path).unwrap()).unwrap()
    }

    #[fixture]
    fn history() -> RevisionMap {
        revision_map(
            [
                "1.1", "1.2", "1.3", "1.4", "1.2.1.1", "1.2.1.2", "1.3.1.1", "1.3.1.2", "1.3.2.1",
                "1.3.1.2.1.1",
            ]
            .into_iter()
            .map(node),
        )
    }

    #[rstest]
    #[case("1.3.1.2", true)]
    #[case("1.3.2.1", true)]
    #[case("1.4", true)]
    #[case("1.2", false)]
    #[case("1.1", false)]
    #[case("1.3", false)]
    #[case("1.2.1.2", false)]
    #[case("1.3.1.2.1.1", true)]
    fn orders_against_a_trunk_label(
        history: RevisionMap,
        #[case] candidate: &str,
        #[case] after: bool,
    ) {
        let labeled = at(&history, "1.3");

        assert_eq!(is_after(at(&history, candidate), labeled), after);
    }

    #[rstest]
    #[case("1.3.1.2", true)]
    #[case("1.3.1.1", false)]
    #[case("1.3.2.1", false)]
    #[case("1.2.1.2", false)]
    #[case("1.4", false)]
    #[case("1.3.1.2.1.1", false)]
    fn orders_against_a_branch_label(
        history: RevisionMap,
        #[case] candidate: &str,
        #[case] after: bool,
    ) {
        let labeled = at(&history, "1.3.1.1");

        assert_eq!(is_after(at(&history, candidate), labeled), after);
    }

    #[rstest]
    fn sibling_branches_are_incomparable(history: RevisionMap) {
        let pairs = [("1.2.1.2", "1.3.1.1"), ("1.3.2.1", "1.3.1.2"), ("1.2.1.1", "1.3.2.1")];

        for (left, right) in pairs {
            let (left, right) = (at(&history, left), at(&history, right));
            assert!(!is_after(left, right), "{} after {}", left.path(), right.path());
            assert!(!is_after(right, left), "{} after {}", right.path(), left.path());
            assert_eq!(classify(left, right), LabelPosition::Unrelated);
            assert_eq!(classify(right, left), LabelPosition::Unrelated);
        }
    }

    #[rstest]
    #[case("1.3.1.2", LabelPosition::Equal)]
    #[case("1.3", LabelPosition::Before)]
    #[case("1.2", LabelPosition::Before)]
    #[case("1.3.1.1", LabelPosition::Before)]
    #[case("1.3.2.1", LabelPosition::Unrelated)]
    #[case("1.4", LabelPosition::Unrelated)]
    #[case("1.3.1.2.1.1", LabelPosition::Unrelated)]
    fn classifies_against_a_branch_revision(
        history: RevisionMap,
        #[case] candidate: &str,
        #[case] expected: LabelPosition,
    ) {
        let labeled = at(&history, "1.3.1.2");

        assert_eq!(classify(at(&history, candidate), labeled), expected);
    }

    #[rstest]
    fn locates_labels_by_name(history: RevisionMap) {
        let labels = vec![
            Label::new("v1".to_string(), RevisionPath::try_parse("1.3").unwrap()),
            Label::new("gone".to_string(), RevisionPath::try_parse("1.9").unwrap()),
        ];

        assert_eq!(
            locate_label("v1", &labels, &history),
            LabelTarget::Found(at(&history, "1.3"))
        );
        assert_eq!(locate_label("gone", &labels, &history), LabelTarget::Unresolved);
        assert_eq!(locate_label("v2", &labels, &history), LabelTarget::Missing);
    }

    proptest! {
        #[test]
        fn prop_same_branch_ordering_is_antisymmetric(
            length in 2usize..12,
            on_branch in any::<bool>(),
            i in 0usize..12,
            j in 0usize..12,
        ) {
            prop_assume!(i < length && j < length && i != j);
            let revisions = revision_map((1..=length).map(|minor| {
                if on_branch {
                    node(&format!("1.3.1.{minor}"))
                } else {
                    node(&format!("1.{minor}"))
                }
            }));
            let left = RevisionRef::new(i, &revisions[&i]);
            let right = RevisionRef::new(j, &revisions[&j]);

            prop_assert!(!(is_after(left, right) && is_after(right, left)));
            prop_assert!(is_after(left, right) || is_after(right, left));
        }

        #[test]
        fn prop_sibling_branches_never_compare(
            fork_a in 1u32..6,
            fork_b in 1u32..6,
            branch_a in 1u32..4,
            branch_b in 1u32..4,
            minor_a in 1u32..5,
            minor_b in 1u32..5,
        ) {
            prop_assume!((fork_a, branch_a) != (fork_b, branch_b));
            let revisions = revision_map([
                node(&format!("1.{fork_a}.{branch_a}.{minor_a}")),
                node(&format!("1.{fork_b}.{branch_b}.{minor_b}")),
            ]);
            let left = RevisionRef::new(0, &revisions[&0]);
            let right = RevisionRef::new(1, &revisions[&1]);

            prop_assert!(!is_after(left, right));
            prop_assert!(!is_after(right, left));
        }
    }
}
