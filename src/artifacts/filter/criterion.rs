use crate::artifacts::entity::workfile_status::WorkfileStatus;
use crate::artifacts::filter::filter_kind::FilterKind;
use anyhow::Context;
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use regex::Regex;

const DATE_TIME_FORMATS: [&str; 7] = [
    "%m/%d/%y %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%y %H:%M",
    "%m/%d/%Y %H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
];

// two-digit years first: `%Y` would read "14" as the year 14
const DATE_FORMATS: [&str; 3] = ["%m/%d/%y", "%m/%d/%Y", "%Y-%m-%d"];

const DISPLAY_FORMAT: &str = "%b %-d, %Y %-I:%M:%S %p";

/// What a filter's data compiles to
#[derive(Debug, Clone)]
pub enum Criterion {
    /// File extension without its leading dot
    Extension(String),
    Pattern(Regex),
    Moment(DateTime<Utc>),
    /// A label or user name
    Name(String),
    Size(u64),
    Status(WorkfileStatus),
    /// No data; the verdict comes from the file's lifecycle
    Lifecycle,
    /// Data that failed to parse; the filter fails everything
    Broken(String),
}

/// A compiled criterion with the two renderings of its data
#[derive(Debug, Clone)]
pub struct CompiledData {
    pub criterion: Criterion,
    /// Normalized data, stable across rebuilds
    pub raw_data: String,
    /// Human readable data, or the error text when broken
    pub display_data: String,
}

impl CompiledData {
    fn plain(criterion: Criterion, data: &str) -> Self {
        Self {
            criterion,
            raw_data: data.to_string(),
            display_data: data.to_string(),
        }
    }

    fn broken(data: &str, error: anyhow::Error) -> Self {
        let message = format!("{:#}", error);
        Self {
            criterion: Criterion::Broken(message.clone()),
            raw_data: data.to_string(),
            display_data: message,
        }
    }
}

/// Compile `data` for a filter of `kind`; never fails.
pub fn compile(kind: FilterKind, data: &str) -> CompiledData {
    let compiled = match kind {
        FilterKind::Extension | FilterKind::ExcludeExtension => Ok(CompiledData::plain(
            Criterion::Extension(data.trim().trim_start_matches('.').to_string()),
            data,
        )),
        FilterKind::RegexFilename | FilterKind::ExcludeRegexFilename => full_match_pattern(data)
            .map(|pattern| CompiledData::plain(Criterion::Pattern(pattern), data)),
        FilterKind::RegexRevisionDescription | FilterKind::ExcludeRegexRevisionDescription => {
            search_pattern(data)
                .map(|pattern| CompiledData::plain(Criterion::Pattern(pattern), data))
        }
        FilterKind::CheckedInBefore | FilterKind::CheckedInAfter => {
            parse_moment(data).map(|moment| CompiledData {
                criterion: Criterion::Moment(moment),
                raw_data: moment.timestamp_millis().to_string(),
                display_data: display_moment(moment),
            })
        }
        FilterKind::WithLabel
        | FilterKind::WithoutLabel
        | FilterKind::AfterLabel
        | FilterKind::AfterLabelIncludeMissing
        | FilterKind::UpToLabel
        | FilterKind::LockedBy
        | FilterKind::ExcludeLockedBy
        | FilterKind::LastEditBy
        | FilterKind::ExcludeLastEditBy
        | FilterKind::EditBy
        | FilterKind::ExcludeEditBy => {
            Ok(CompiledData::plain(Criterion::Name(data.to_string()), data))
        }
        FilterKind::FileSizeGreaterThan | FilterKind::FileSizeLessThan => data
            .trim()
            .parse::<u64>()
            .with_context(|| format!("invalid file size: {}", data))
            .map(|size| CompiledData::plain(Criterion::Size(size), data)),
        FilterKind::Status | FilterKind::ExcludeStatus => WorkfileStatus::try_parse(data)
            .map(|status| CompiledData::plain(Criterion::Status(status), data)),
        FilterKind::Obsolete | FilterKind::ExcludeObsolete | FilterKind::ExcludeUncontrolled => {
            Ok(CompiledData::plain(Criterion::Lifecycle, ""))
        }
    };

    compiled.unwrap_or_else(|error| CompiledData::broken(data, error))
}

/// A pattern that has to match the whole file name.
///
/// The pattern is anchored in its parsed form, where inline flags and verbose-mode comments
/// are already resolved and cannot reach past the anchors.
fn full_match_pattern(data: &str) -> anyhow::Result<Regex> {
    let parsed = regex_syntax::Parser::new()
        .parse(data)
        .with_context(|| format!("invalid regular expression: {}", data))?;

    Regex::new(&format!("^(?:{})$", parsed))
        .with_context(|| format!("invalid regular expression: {}", data))
}

fn search_pattern(data: &str) -> anyhow::Result<Regex> {
    Regex::new(data).with_context(|| format!("invalid regular expression: {}", data))
}

/// Parse a filter date.
///
/// Accepts `MM/DD/YY` and `MM/DD/YYYY` with an optional `HH:MM[:SS]`, ISO dates and
/// date-times, RFC 3339 timestamps and epoch milliseconds. Any run of digits, with an
/// optional leading `-` for moments before 1970, is read as epoch milliseconds. Times without
/// an offset are read in the local time zone.
pub fn parse_moment(data: &str) -> anyhow::Result<DateTime<Utc>> {
    let data = data.trim();

    let digits = data.strip_prefix('-').unwrap_or(data);
    if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) {
        let millis: i64 = data.parse().with_context(|| format!("invalid date: {}", data))?;
        return Utc
            .timestamp_millis_opt(millis)
            .single()
            .with_context(|| format!("invalid date: {}", data));
    }

    if let Ok(moment) = DateTime::parse_from_rfc3339(data) {
        return Ok(moment.with_timezone(&Utc));
    }

    let naive = DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(data, format).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|format| NaiveDate::parse_from_str(data, format).ok())
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .with_context(|| format!("invalid date: {}", data))?;

    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|moment| moment.with_timezone(&Utc))
        .with_context(|| format!("date does not exist in the local time zone: {}", data))
}

pub fn display_moment(moment: DateTime<Utc>) -> String {
    moment.with_timezone(&Local).format(DISPLAY_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn local(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
    ) -> DateTime<Utc> {
        Local
            .with_ymd_and_hms(year, month, day, hour, minute, second)
            .earliest()
            .unwrap()
            .with_timezone(&Utc)
    }

    #[rstest]
    #[case("01/01/14", local(2014, 1, 1, 0, 0, 0))]
    #[case("01/01/2014", local(2014, 1, 1, 0, 0, 0))]
    #[case("12/31/99 23:59", local(1999, 12, 31, 23, 59, 0))]
    #[case("03/15/2021 08:30:15", local(2021, 3, 15, 8, 30, 15))]
    #[case("2021-03-15", local(2021, 3, 15, 0, 0, 0))]
    #[case("2021-03-15T08:30:15", local(2021, 3, 15, 8, 30, 15))]
    fn parses_local_dates(#[case] input: &str, #[case] expected: DateTime<Utc>) {
        assert_eq!(parse_moment(input).unwrap(), expected);
    }

    #[test]
    fn parses_offsets_and_epoch_millis() {
        let expected = Utc.with_ymd_and_hms(2014, 1, 1, 0, 0, 0).unwrap();

        assert_eq!(parse_moment("2014-01-01T00:00:00Z").unwrap(), expected);
        assert_eq!(parse_moment("1388534400000").unwrap(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("yesterday")]
    #[case("13/45/2014")]
    #[case("2014/01/01")]
    #[case("-")]
    #[case("--5")]
    fn rejects_bad_dates(#[case] input: &str) {
        assert!(parse_moment(input).is_err());
    }

    #[test]
    fn dates_normalize_to_epoch_millis() {
        let compiled = compile(FilterKind::CheckedInBefore, "01/01/2014");
        let moment = local(2014, 1, 1, 0, 0, 0);

        assert_eq!(compiled.raw_data, moment.timestamp_millis().to_string());
        assert_eq!(compiled.display_data, "Jan 1, 2014 12:00:00 AM");

        let rebuilt = compile(FilterKind::CheckedInBefore, &compiled.raw_data);
        assert_eq!(rebuilt.raw_data, compiled.raw_data);
    }

    #[test]
    fn bad_regex_keeps_data_and_reports_error() {
        let compiled = compile(FilterKind::RegexFilename, "[abc");

        assert!(matches!(compiled.criterion, Criterion::Broken(_)));
        assert_eq!(compiled.raw_data, "[abc");
        assert!(compiled.display_data.starts_with("invalid regular expression: [abc"));
    }

    #[test]
    fn bad_size_is_broken() {
        let compiled = compile(FilterKind::FileSizeGreaterThan, "ten");

        assert!(matches!(compiled.criterion, Criterion::Broken(_)));
        assert_eq!(compiled.raw_data, "ten");
    }

    #[test]
    fn filename_patterns_match_whole_names() {
        let compiled = compile(FilterKind::RegexFilename, "Foo|Bar.*");
        let Criterion::Pattern(pattern) = compiled.criterion else {
            panic!("expected a pattern");
        };

        assert!(pattern.is_match("Foo"));
        assert!(pattern.is_match("Bar.java"));
        assert!(!pattern.is_match("Foo.java"));
        assert!(!pattern.is_match("xBar"));
    }

    #[test]
    fn description_patterns_search() {
        let compiled = compile(FilterKind::RegexRevisionDescription, "fix(ed)?");
        let Criterion::Pattern(pattern) = compiled.criterion else {
            panic!("expected a pattern");
        };

        assert!(pattern.is_match("Bug fixed in parser"));
        assert!(!pattern.is_match("Refactor"));
    }

    #[test]
    fn lifecycle_kinds_ignore_data() {
        let compiled = compile(FilterKind::ExcludeObsolete, "whatever");

        assert!(matches!(compiled.criterion, Criterion::Lifecycle));
        assert_eq!(compiled.raw_data, "");
    }

    #[test]
    fn verbose_filename_patterns_keep_their_comments() {
        let compiled = compile(FilterKind::RegexFilename, "(?x)Foo\\.java # java sources");
        let Criterion::Pattern(pattern) = compiled.criterion else {
            panic!("expected a pattern, got {}", compiled.display_data);
        };

        assert!(pattern.is_match("Foo.java"));
        assert!(!pattern.is_match("Foo.javax"));
        assert!(!pattern.is_match("Foo java"));
    }

    #[test]
    fn dates_before_1970_rebuild_from_their_raw_data() {
        let compiled = compile(FilterKind::CheckedInBefore, "06/15/1965");
        assert!(compiled.raw_data.starts_with('-'));

        let rebuilt = compile(FilterKind::CheckedInBefore, &compiled.raw_data);

        assert!(matches!(rebuilt.criterion, Criterion::Moment(_)));
        assert_eq!(rebuilt.raw_data, compiled.raw_data);
        assert_eq!(rebuilt.display_data, compiled.display_data);
    }

    #[test]
    fn digit_runs_are_epoch_millis() {
        let compact = parse_moment("20140101").unwrap();

        assert_eq!(compact.timestamp_millis(), 20_140_101);
        assert_eq!(compact.date_naive(), NaiveDate::from_ymd_opt(1970, 1, 1).unwrap());
        assert_eq!(parse_moment("-1000").unwrap().timestamp_millis(), -1000);
    }
}
