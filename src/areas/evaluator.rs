//! Filter evaluation
//!
//! A collection decides a file in two phases:
//!
//! 1. every AND filter has to pass; revision filters prune the working revision map and
//!    evaluation stops at the first failure or as soon as the map runs empty
//! 2. at least one OR filter has to pass, unless there are none
//!
//! Revision detail is only read from the file when some filter needs it.

use crate::artifacts::collection::filter_collection::FilterCollection;
use crate::artifacts::entity::FileEntity;
use crate::artifacts::filter::filter::{FileContext, FileFilter};
use crate::artifacts::filter::filter_kind::Capability;
use crate::artifacts::revision::revision_node::{RevisionMap, RevisionNode, RevisionRef};
use tracing::debug;

/// Verdict for one file, with the revisions that survived the AND phase
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub passes: bool,
    pub revisions: RevisionMap,
}

/// Applies filter collections to files.
///
/// Holds no state; one evaluator may serve any number of threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct FilterEvaluator;

impl FilterEvaluator {
    pub fn evaluate(&self, file: &dyn FileEntity, collection: &FilterCollection) -> Evaluation {
        self.evaluate_filters(file, &collection.list_filters())
    }

    pub fn evaluate_filters<F: FileFilter>(
        &self,
        file: &dyn FileEntity,
        filters: &[F],
    ) -> Evaluation {
        let revisions = if Self::needs_detail(file, filters) {
            file.revisions()
        } else {
            RevisionMap::new()
        };

        self.run_phases(file, filters, &revisions)
    }

    /// Decide one revision against the revision filters of `filters` only.
    ///
    /// Every AND revision filter has to pass, and one OR revision filter when there are any.
    pub fn passes_revision_filters<F: FileFilter>(
        &self,
        revision: RevisionRef<'_>,
        context: &FileContext<'_>,
        filters: &[F],
    ) -> bool {
        let (and_filters, or_filters): (Vec<&F>, Vec<&F>) = filters
            .iter()
            .filter(|filter| filter.capability() == Capability::Revision)
            .partition(|filter| filter.is_and_filter());

        and_filters
            .iter()
            .all(|filter| filter.passes_revision_filter(revision, context))
            && (or_filters.is_empty()
                || or_filters
                    .iter()
                    .any(|filter| filter.passes_revision_filter(revision, context)))
    }

    /// The revisions of `file` to report on, `None` when the file itself fails.
    pub fn report(
        &self,
        file: &dyn FileEntity,
        collection: &FilterCollection,
    ) -> Option<RevisionMap> {
        let filters = collection.list_filters();
        let full = file.revisions();
        let empty = RevisionMap::new();
        let detail = if Self::needs_detail(file, &filters) {
            &full
        } else {
            &empty
        };

        let evaluation = self.run_phases(file, &filters, detail);
        if !evaluation.passes {
            return None;
        }

        let context = FileContext::new(file.labels(), &full);
        let passes = |index: usize, node: &RevisionNode| {
            self.passes_revision_filters(RevisionRef::new(index, node), &context, &filters)
        };

        let reported: RevisionMap = if filters.iter().any(FileFilter::requires_revision_detail) {
            evaluation
                .revisions
                .into_iter()
                .filter(|(index, node)| passes(*index, node))
                .collect()
        } else {
            full.iter()
                .filter(|(index, node)| passes(**index, *node))
                .map(|(index, node)| (*index, node.clone()))
                .collect()
        };
        Some(reported)
    }

    fn needs_detail<F: FileFilter>(file: &dyn FileEntity, filters: &[F]) -> bool {
        file.has_archive() && filters.iter().any(F::requires_revision_detail)
    }

    /// Both phases over `revisions`, the file's full map or an empty one when no filter
    /// needs detail.
    fn run_phases<F: FileFilter>(
        &self,
        file: &dyn FileEntity,
        filters: &[F],
        revisions: &RevisionMap,
    ) -> Evaluation {
        let context = FileContext::new(file.labels(), revisions);
        let mut working = revisions.clone();

        let and_filters = filters
            .iter()
            .enumerate()
            .filter(|(_, filter)| filter.is_and_filter());
        for (position, filter) in and_filters {
            let passed = match filter.capability() {
                Capability::Entity => filter.passes_entity_filter(file, &mut working),
                Capability::Revision => {
                    working.retain(|index, node| {
                        filter.passes_revision_filter(RevisionRef::new(*index, node), &context)
                    });
                    !working.is_empty()
                }
            };

            if !passed {
                debug!(file = file.short_name(), position, "AND filter failed");
                return Evaluation {
                    passes: false,
                    revisions: working,
                };
            }
        }

        let mut or_filters = filters
            .iter()
            .filter(|filter| !filter.is_and_filter())
            .peekable();
        let passes = or_filters.peek().is_none()
            || or_filters.any(|filter| match filter.capability() {
                Capability::Entity => {
                    // OR filters never prune what the AND phase kept
                    let mut scratch = working.clone();
                    filter.passes_entity_filter(file, &mut scratch)
                }
                Capability::Revision => working.iter().any(|(index, node)| {
                    filter.passes_revision_filter(RevisionRef::new(*index, node), &context)
                }),
            });

        if !passes {
            debug!(file = file.short_name(), "no OR filter passed");
        }

        Evaluation {
            passes,
            revisions: working,
        }
    }
}
