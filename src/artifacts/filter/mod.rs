//! File and revision filters
//!
//! A filter is an immutable `(kind, data, AND/OR)` triple with the criterion compiled from
//! its data at construction time:
//!
//! - `filter_kind`: the closed set of filter kinds, their persisted tags and capabilities
//! - `criterion`: parsing filter data (patterns, dates, sizes, statuses) into criteria
//! - `filter`: the filter value and its pass/fail decisions
//! - `factory`: rebuilding filters from persisted `(kind, data, AND/OR)` records
//!
//! Bad data never aborts construction: the filter is built permanently failing and its
//! display data carries the error text.

pub mod criterion;
pub mod factory;
pub mod filter;
pub mod filter_kind;

use filter_kind::FilterKind;

pub const FILTER_KINDS: phf::Map<&'static str, FilterKind> = phf::phf_map! {
    "Include Extension" => FilterKind::Extension,
    "Exclude Extension" => FilterKind::ExcludeExtension,
    "Include Regular Expression Filename" => FilterKind::RegexFilename,
    "Exclude Regular Expression Filename" => FilterKind::ExcludeRegexFilename,
    "Revision description regular expression" => FilterKind::RegexRevisionDescription,
    "Exclude revision description regular expression" =>
        FilterKind::ExcludeRegexRevisionDescription,
    "Checked in before" => FilterKind::CheckedInBefore,
    "Checked in after" => FilterKind::CheckedInAfter,
    "With label" => FilterKind::WithLabel,
    "Without label" => FilterKind::WithoutLabel,
    "After label" => FilterKind::AfterLabel,
    "After label include missing" => FilterKind::AfterLabelIncludeMissing,
    "Up to label" => FilterKind::UpToLabel,
    "Locked by" => FilterKind::LockedBy,
    "Exclude locked by" => FilterKind::ExcludeLockedBy,
    "Include last edit by" => FilterKind::LastEditBy,
    "Exclude last edit by" => FilterKind::ExcludeLastEditBy,
    "Edit by" => FilterKind::EditBy,
    "Exclude edit by" => FilterKind::ExcludeEditBy,
    "Filesize greater than" => FilterKind::FileSizeGreaterThan,
    "Filesize less than" => FilterKind::FileSizeLessThan,
    "Include File Status" => FilterKind::Status,
    "Exclude File Status" => FilterKind::ExcludeStatus,
    "Obsolete files" => FilterKind::Obsolete,
    "Exclude obsolete files" => FilterKind::ExcludeObsolete,
    "Exclude uncontrolled files" => FilterKind::ExcludeUncontrolled,
};
