use crate::artifacts::filter::filter::{FileFilter, Filter};
use crate::artifacts::filter::filter_kind::FilterKind;
use derive_new::new;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// A filter as persisted: kind tag, normalized data and AND/OR flag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct FilterRecord {
    pub kind: String,
    #[serde(default)]
    pub data: String,
    #[serde(default = "and_by_default")]
    pub is_and: bool,
}

fn and_by_default() -> bool {
    true
}

impl From<&Filter> for FilterRecord {
    fn from(filter: &Filter) -> Self {
        Self::new(
            filter.kind().tag().to_string(),
            filter.raw_data().to_string(),
            filter.is_and_filter(),
        )
    }
}

/// Builds filters from their persisted form
pub struct FilterFactory;

impl FilterFactory {
    /// Build a filter from its kind tag; `None` when the tag names no known kind.
    pub fn build(kind: &str, data: &str, is_and_filter: bool) -> Option<Filter> {
        match FilterKind::try_from_tag(kind) {
            Some(kind) => Some(Filter::new(kind, data, is_and_filter)),
            None => {
                warn!(kind, "unknown filter kind");
                None
            }
        }
    }

    pub fn from_record(record: &FilterRecord) -> Option<Filter> {
        Self::build(&record.kind, &record.data, record.is_and)
    }

    /// A fresh filter equal to `filter`, rebuilt from its raw data.
    pub fn rebuild(filter: &Filter) -> Filter {
        Filter::new(filter.kind(), filter.raw_data(), filter.is_and_filter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_data(kind: FilterKind) -> &'static str {
        match kind {
            FilterKind::Extension | FilterKind::ExcludeExtension => "java",
            FilterKind::RegexFilename | FilterKind::ExcludeRegexFilename => "Foo.*",
            FilterKind::RegexRevisionDescription
            | FilterKind::ExcludeRegexRevisionDescription => "fix",
            FilterKind::CheckedInBefore | FilterKind::CheckedInAfter => "01/01/2014",
            FilterKind::FileSizeGreaterThan | FilterKind::FileSizeLessThan => "1024",
            FilterKind::Status | FilterKind::ExcludeStatus => "Stale",
            FilterKind::Obsolete
            | FilterKind::ExcludeObsolete
            | FilterKind::ExcludeUncontrolled => "",
            _ => "alice",
        }
    }

    #[test]
    fn rebuilds_every_kind_from_its_record() {
        for kind in FilterKind::ALL {
            for is_and in [true, false] {
                let filter = FilterFactory::build(kind.tag(), sample_data(kind), is_and).unwrap();
                let record = FilterRecord::from(&filter);
                let rebuilt = FilterFactory::from_record(&record).unwrap();

                assert_eq!(rebuilt, filter, "{kind:?}");
                assert_eq!(rebuilt.is_and_filter(), is_and);
                assert_eq!(rebuilt.raw_data(), filter.raw_data());
                assert_eq!(rebuilt.error(), None);
            }
        }
    }

    #[test]
    fn rebuild_keeps_broken_data() {
        let broken =
            FilterFactory::build("Include Regular Expression Filename", "[", false).unwrap();
        let rebuilt = FilterFactory::rebuild(&broken);

        assert_eq!(rebuilt.raw_data(), "[");
        assert!(rebuilt.error().is_some());
        assert!(!rebuilt.is_and_filter());
    }

    #[test]
    fn unknown_kinds_build_nothing() {
        assert!(FilterFactory::build("Include Author", "alice", true).is_none());
    }

    #[test]
    fn records_default_to_and() {
        let record: FilterRecord =
            serde_json::from_str(r#"{ "kind": "Exclude obsolete files" }"#).unwrap();

        assert_eq!(
            record,
            FilterRecord::new("Exclude obsolete files".to_string(), String::new(), true)
        );
    }

    #[test]
    fn dates_before_1970_survive_a_round_trip() {
        let before = FilterFactory::build("Checked in before", "06/15/1965", true).unwrap();
        assert_eq!(before.error(), None);

        let rebuilt = FilterFactory::from_record(&FilterRecord::from(&before)).unwrap();

        assert_eq!(rebuilt.error(), None);
        assert_eq!(rebuilt.data(), before.data());
        assert_eq!(FilterFactory::rebuild(&before).error(), None);
    }
}
