use colored::{ColoredString, Colorize};
use serde::{Deserialize, Serialize};

/// Status of a workfile compared with its archive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum WorkfileStatus {
    #[default]
    Current,
    Stale,
    YourCopyChanged,
    MergeRequired,
    Missing,
    NotControlled,
}

impl WorkfileStatus {
    pub const ALL: [WorkfileStatus; 6] = [
        WorkfileStatus::Current,
        WorkfileStatus::Stale,
        WorkfileStatus::YourCopyChanged,
        WorkfileStatus::MergeRequired,
        WorkfileStatus::Missing,
        WorkfileStatus::NotControlled,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            WorkfileStatus::Current => "Current",
            WorkfileStatus::Stale => "Stale",
            WorkfileStatus::YourCopyChanged => "Your copy changed",
            WorkfileStatus::MergeRequired => "Merge required",
            WorkfileStatus::Missing => "Missing",
            WorkfileStatus::NotControlled => "Not controlled",
        }
    }

    /// Parse a display name, ignoring case and surrounding whitespace.
    pub fn try_parse(status: &str) -> anyhow::Result<Self> {
        let status = status.trim();
        Self::ALL
            .into_iter()
            .find(|candidate| candidate.display_name().eq_ignore_ascii_case(status))
            .ok_or_else(|| anyhow::anyhow!("unknown workfile status: {}", status))
    }

    pub fn to_colored(&self) -> ColoredString {
        match self {
            WorkfileStatus::Current => self.display_name().green(),
            WorkfileStatus::Stale | WorkfileStatus::Missing => self.display_name().red(),
            WorkfileStatus::YourCopyChanged | WorkfileStatus::MergeRequired => {
                self.display_name().yellow()
            }
            WorkfileStatus::NotControlled => self.display_name().normal(),
        }
    }
}

impl std::fmt::Display for WorkfileStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
