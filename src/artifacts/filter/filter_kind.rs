use crate::artifacts::filter::FILTER_KINDS;

/// Which decision a filter makes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Decides once per file
    Entity,
    /// Decides per revision of a file
    Revision,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FilterKind {
    Extension,
    ExcludeExtension,
    RegexFilename,
    ExcludeRegexFilename,
    RegexRevisionDescription,
    ExcludeRegexRevisionDescription,
    CheckedInBefore,
    CheckedInAfter,
    WithLabel,
    WithoutLabel,
    AfterLabel,
    AfterLabelIncludeMissing,
    UpToLabel,
    LockedBy,
    ExcludeLockedBy,
    LastEditBy,
    ExcludeLastEditBy,
    EditBy,
    ExcludeEditBy,
    FileSizeGreaterThan,
    FileSizeLessThan,
    Status,
    ExcludeStatus,
    Obsolete,
    ExcludeObsolete,
    ExcludeUncontrolled,
}

impl FilterKind {
    pub const ALL: [FilterKind; 26] = [
        FilterKind::Extension,
        FilterKind::ExcludeExtension,
        FilterKind::RegexFilename,
        FilterKind::ExcludeRegexFilename,
        FilterKind::RegexRevisionDescription,
        FilterKind::ExcludeRegexRevisionDescription,
        FilterKind::CheckedInBefore,
        FilterKind::CheckedInAfter,
        FilterKind::WithLabel,
        FilterKind::WithoutLabel,
        FilterKind::AfterLabel,
        FilterKind::AfterLabelIncludeMissing,
        FilterKind::UpToLabel,
        FilterKind::LockedBy,
        FilterKind::ExcludeLockedBy,
        FilterKind::LastEditBy,
        FilterKind::ExcludeLastEditBy,
        FilterKind::EditBy,
        FilterKind::ExcludeEditBy,
        FilterKind::FileSizeGreaterThan,
        FilterKind::FileSizeLessThan,
        FilterKind::Status,
        FilterKind::ExcludeStatus,
        FilterKind::Obsolete,
        FilterKind::ExcludeObsolete,
        FilterKind::ExcludeUncontrolled,
    ];

    /// Stable tag used when the filter is persisted.
    pub fn tag(&self) -> &'static str {
        match self {
            FilterKind::Extension => "Include Extension",
            FilterKind::ExcludeExtension => "Exclude Extension",
            FilterKind::RegexFilename => "Include Regular Expression Filename",
            FilterKind::ExcludeRegexFilename => "Exclude Regular Expression Filename",
            FilterKind::RegexRevisionDescription => "Revision description regular expression",
            FilterKind::ExcludeRegexRevisionDescription => {
                "Exclude revision description regular expression"
            }
            FilterKind::CheckedInBefore => "Checked in before",
            FilterKind::CheckedInAfter => "Checked in after",
            FilterKind::WithLabel => "With label",
            FilterKind::WithoutLabel => "Without label",
            FilterKind::AfterLabel => "After label",
            FilterKind::AfterLabelIncludeMissing => "After label include missing",
            FilterKind::UpToLabel => "Up to label",
            FilterKind::LockedBy => "Locked by",
            FilterKind::ExcludeLockedBy => "Exclude locked by",
            FilterKind::LastEditBy => "Include last edit by",
            FilterKind::ExcludeLastEditBy => "Exclude last edit by",
            FilterKind::EditBy => "Edit by",
            FilterKind::ExcludeEditBy => "Exclude edit by",
            FilterKind::FileSizeGreaterThan => "Filesize greater than",
            FilterKind::FileSizeLessThan => "Filesize less than",
            FilterKind::Status => "Include File Status",
            FilterKind::ExcludeStatus => "Exclude File Status",
            FilterKind::Obsolete => "Obsolete files",
            FilterKind::ExcludeObsolete => "Exclude obsolete files",
            FilterKind::ExcludeUncontrolled => "Exclude uncontrolled files",
        }
    }

    pub fn try_from_tag(tag: &str) -> Option<Self> {
        FILTER_KINDS.get(tag).copied()
    }

    pub fn capability(&self) -> Capability {
        match self {
            FilterKind::AfterLabel
            | FilterKind::AfterLabelIncludeMissing
            | FilterKind::UpToLabel
            | FilterKind::EditBy
            | FilterKind::ExcludeEditBy => Capability::Revision,
            _ => Capability::Entity,
        }
    }

    /// Whether deciding needs the file's revision map.
    ///
    /// True for every revision filter, and for the entity filters that look at individual
    /// revisions to reach their file-level verdict.
    pub fn requires_revision_detail(&self) -> bool {
        match self.capability() {
            Capability::Revision => true,
            Capability::Entity => matches!(
                self,
                FilterKind::RegexRevisionDescription
                    | FilterKind::ExcludeRegexRevisionDescription
                    | FilterKind::CheckedInBefore
                    | FilterKind::CheckedInAfter
            ),
        }
    }

    /// Filters whose verdict does not depend on any data.
    pub fn takes_data(&self) -> bool {
        !matches!(
            self,
            FilterKind::Obsolete | FilterKind::ExcludeObsolete | FilterKind::ExcludeUncontrolled
        )
    }

    /// Short description of the data the kind expects.
    pub fn data_hint(&self) -> &'static str {
        match self {
            FilterKind::Extension | FilterKind::ExcludeExtension => "file extension",
            FilterKind::RegexFilename
            | FilterKind::ExcludeRegexFilename
            | FilterKind::RegexRevisionDescription
            | FilterKind::ExcludeRegexRevisionDescription => "regular expression",
            FilterKind::CheckedInBefore | FilterKind::CheckedInAfter => {
                "date, date-time or epoch milliseconds (any run of digits)"
            }
            FilterKind::WithLabel
            | FilterKind::WithoutLabel
            | FilterKind::AfterLabel
            | FilterKind::AfterLabelIncludeMissing
            | FilterKind::UpToLabel => "label name",
            FilterKind::LockedBy
            | FilterKind::ExcludeLockedBy
            | FilterKind::LastEditBy
            | FilterKind::ExcludeLastEditBy
            | FilterKind::EditBy
            | FilterKind::ExcludeEditBy => "user name",
            FilterKind::FileSizeGreaterThan | FilterKind::FileSizeLessThan => "size in bytes",
            FilterKind::Status | FilterKind::ExcludeStatus => "workfile status",
            FilterKind::Obsolete
            | FilterKind::ExcludeObsolete
            | FilterKind::ExcludeUncontrolled => "none",
        }
    }
}

impl std::fmt::Display for FilterKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn every_kind_round_trips_through_its_tag() {
        for kind in FilterKind::ALL {
            assert_eq!(FilterKind::try_from_tag(kind.tag()), Some(kind), "{kind:?}");
        }
        assert_eq!(FILTER_KINDS.len(), FilterKind::ALL.len());
    }

    #[test]
    fn unknown_tags_are_not_kinds() {
        assert_eq!(FilterKind::try_from_tag("By Commit id"), None);
        assert_eq!(FilterKind::try_from_tag("include extension"), None);
    }

    #[rstest]
    #[case(FilterKind::Extension, Capability::Entity, false)]
    #[case(FilterKind::RegexRevisionDescription, Capability::Entity, true)]
    #[case(FilterKind::CheckedInBefore, Capability::Entity, true)]
    #[case(FilterKind::WithLabel, Capability::Entity, false)]
    #[case(FilterKind::AfterLabel, Capability::Revision, true)]
    #[case(FilterKind::UpToLabel, Capability::Revision, true)]
    #[case(FilterKind::ExcludeEditBy, Capability::Revision, true)]
    #[case(FilterKind::ExcludeObsolete, Capability::Entity, false)]
    fn reports_capability_and_detail(
        #[case] kind: FilterKind,
        #[case] capability: Capability,
        #[case] requires_detail: bool,
    ) {
        assert_eq!(kind.capability(), capability);
        assert_eq!(kind.requires_revision_detail(), requires_detail);
    }
}
