use crate::artifacts::entity::{FileEntity, FileLifecycle};
use crate::artifacts::filter::criterion::{Criterion, compile};
use crate::artifacts::filter::filter_kind::{Capability, FilterKind};
use crate::artifacts::revision::label::{Label, find_label};
use crate::artifacts::revision::label_ordering::{
    LabelPosition, LabelTarget, classify, is_after, locate_label,
};
use crate::artifacts::revision::revision_node::{RevisionMap, RevisionNode, RevisionRef};
use chrono::{DateTime, Utc};
use derive_new::new;
use std::hash::{Hash, Hasher};

/// What a revision filter can see of the file a revision belongs to
#[derive(Debug, Clone, Copy, new)]
pub struct FileContext<'a> {
    labels: &'a [Label],
    /// The file's full revision map, before any pruning
    revisions: &'a RevisionMap,
}

impl<'a> FileContext<'a> {
    pub fn labels(&self) -> &'a [Label] {
        self.labels
    }

    pub fn revisions(&self) -> &'a RevisionMap {
        self.revisions
    }
}

/// The decisions the evaluator asks of a filter
pub trait FileFilter {
    fn capability(&self) -> Capability;

    fn is_and_filter(&self) -> bool;

    fn requires_revision_detail(&self) -> bool;

    /// Decide for the whole file.
    ///
    /// `revisions` is the working revision map; filters scoped to revisions may prune it to
    /// the revisions they accept.
    fn passes_entity_filter(&self, file: &dyn FileEntity, revisions: &mut RevisionMap) -> bool;

    /// Decide for one revision of a file.
    fn passes_revision_filter(&self, revision: RevisionRef<'_>, context: &FileContext<'_>) -> bool;
}

/// An immutable filter.
///
/// Two filters are equal when their kind and normalized data agree; the AND/OR flag takes no
/// part in equality.
#[derive(Debug, Clone)]
pub struct Filter {
    kind: FilterKind,
    raw_data: String,
    display_data: String,
    is_and_filter: bool,
    criterion: Criterion,
}

impl Filter {
    pub fn new(kind: FilterKind, data: &str, is_and_filter: bool) -> Self {
        let compiled = compile(kind, data);
        Self {
            kind,
            raw_data: compiled.raw_data,
            display_data: compiled.display_data,
            is_and_filter,
            criterion: compiled.criterion,
        }
    }

    pub fn kind(&self) -> FilterKind {
        self.kind
    }

    /// Normalized data; feeding it back to [`Filter::new`] yields an equal filter.
    pub fn raw_data(&self) -> &str {
        &self.raw_data
    }

    /// Display form of the data, or the error text when it failed to parse.
    pub fn data(&self) -> &str {
        &self.display_data
    }

    /// The error text when the data failed to parse.
    pub fn error(&self) -> Option<&str> {
        match &self.criterion {
            Criterion::Broken(message) => Some(message),
            _ => None,
        }
    }

    fn has_extension(file: &dyn FileEntity, extension: &str) -> bool {
        let name = file.short_name();
        let suffix = format!(".{}", extension);
        if file.ignore_case() {
            name.to_lowercase().ends_with(&suffix.to_lowercase())
        } else {
            name.ends_with(&suffix)
        }
    }

    fn any_description_matches(revisions: &RevisionMap, pattern: &regex::Regex) -> bool {
        revisions.values().any(|revision| pattern.is_match(revision.description()))
    }

    /// Keep only the revisions checked in before `bound`.
    fn checked_in_before(revisions: &mut RevisionMap, bound: DateTime<Utc>) -> bool {
        let Some(oldest) = revisions.values().map(RevisionNode::checked_in).min() else {
            return false;
        };
        if oldest >= bound {
            return false;
        }

        revisions.retain(|_, revision| revision.checked_in() < bound);
        !revisions.is_empty()
    }

    fn is_after_label(
        revision: RevisionRef<'_>,
        context: &FileContext<'_>,
        name: &str,
        when_missing: bool,
    ) -> bool {
        match locate_label(name, context.labels(), context.revisions()) {
            LabelTarget::Missing => when_missing,
            LabelTarget::Unresolved => false,
            LabelTarget::Found(labeled) => is_after(revision, labeled),
        }
    }
}

impl FileFilter for Filter {
    fn capability(&self) -> Capability {
        self.kind.capability()
    }

    fn is_and_filter(&self) -> bool {
        self.is_and_filter
    }

    fn requires_revision_detail(&self) -> bool {
        self.kind.requires_revision_detail()
    }

    fn passes_entity_filter(&self, file: &dyn FileEntity, revisions: &mut RevisionMap) -> bool {
        if self.requires_revision_detail() && !file.has_archive() {
            return false;
        }

        match (self.kind, &self.criterion) {
            (FilterKind::Extension, Criterion::Extension(extension)) => {
                Self::has_extension(file, extension)
            }
            (FilterKind::ExcludeExtension, Criterion::Extension(extension)) => {
                !Self::has_extension(file, extension)
            }
            (FilterKind::RegexFilename, Criterion::Pattern(pattern)) => {
                pattern.is_match(file.short_name())
            }
            (FilterKind::ExcludeRegexFilename, Criterion::Pattern(pattern)) => {
                !pattern.is_match(file.short_name())
            }
            (FilterKind::RegexRevisionDescription, Criterion::Pattern(pattern)) => {
                Self::any_description_matches(revisions, pattern)
            }
            (FilterKind::ExcludeRegexRevisionDescription, Criterion::Pattern(pattern)) => {
                !Self::any_description_matches(revisions, pattern)
            }
            (FilterKind::CheckedInBefore, Criterion::Moment(bound)) => {
                Self::checked_in_before(revisions, *bound)
            }
            (FilterKind::CheckedInAfter, Criterion::Moment(bound)) => {
                revisions.values().any(|revision| revision.checked_in() > *bound)
            }
            (FilterKind::WithLabel, Criterion::Name(name)) => {
                find_label(file.labels(), name).is_some()
            }
            (FilterKind::WithoutLabel, Criterion::Name(name)) => {
                find_label(file.labels(), name).is_none()
            }
            (FilterKind::LockedBy, Criterion::Name(name)) => {
                file.lock_holder() == Some(name.as_str())
            }
            (FilterKind::ExcludeLockedBy, Criterion::Name(name)) => {
                file.lock_holder() != Some(name.as_str())
            }
            (FilterKind::LastEditBy, Criterion::Name(name)) => {
                file.last_editor() == Some(name.as_str())
            }
            (FilterKind::ExcludeLastEditBy, Criterion::Name(name)) => {
                file.last_editor() != Some(name.as_str())
            }
            (FilterKind::FileSizeGreaterThan, Criterion::Size(bound)) => {
                file.workfile_size().is_some_and(|size| size > *bound)
            }
            (FilterKind::FileSizeLessThan, Criterion::Size(bound)) => {
                file.workfile_size().is_some_and(|size| size < *bound)
            }
            (FilterKind::Status, Criterion::Status(status)) => file.status() == *status,
            (FilterKind::ExcludeStatus, Criterion::Status(status)) => file.status() != *status,
            (FilterKind::Obsolete, Criterion::Lifecycle) => {
                file.lifecycle() == FileLifecycle::Obsolete
            }
            (FilterKind::ExcludeObsolete, Criterion::Lifecycle) => {
                file.lifecycle() != FileLifecycle::Obsolete
            }
            (FilterKind::ExcludeUncontrolled, Criterion::Lifecycle) => {
                file.lifecycle() != FileLifecycle::Uncontrolled
            }
            // broken data, or a revision filter asked about a whole file
            _ => false,
        }
    }

    fn passes_revision_filter(&self, revision: RevisionRef<'_>, context: &FileContext<'_>) -> bool {
        match (self.kind, &self.criterion) {
            (FilterKind::AfterLabel, Criterion::Name(name)) => {
                Self::is_after_label(revision, context, name, false)
            }
            (FilterKind::AfterLabelIncludeMissing, Criterion::Name(name)) => {
                Self::is_after_label(revision, context, name, true)
            }
            (FilterKind::UpToLabel, Criterion::Name(name)) => {
                match locate_label(name, context.labels(), context.revisions()) {
                    LabelTarget::Found(labeled) => matches!(
                        classify(revision, labeled),
                        LabelPosition::Equal | LabelPosition::Before
                    ),
                    LabelTarget::Missing | LabelTarget::Unresolved => false,
                }
            }
            (FilterKind::EditBy, Criterion::Name(name)) => {
                revision.node.editor() == name.as_str()
            }
            (FilterKind::ExcludeEditBy, Criterion::Name(name)) => {
                revision.node.editor() != name.as_str()
            }
            _ => false,
        }
    }
}

impl PartialEq for Filter {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.raw_data == other.raw_data
    }
}

impl Eq for Filter {}

impl Hash for Filter {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind.hash(state);
        self.raw_data.hash(state);
    }
}

impl std::fmt::Display for Filter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let joiner = if self.is_and_filter { "AND" } else { "OR" };
        if self.kind.takes_data() {
            write!(f, "{} {}: {}", joiner, self.kind, self.display_data)
        } else {
            write!(f, "{} {}", joiner, self.kind)
        }
    }
}
