use crate::artifacts::revision::REVISION_PATH_REGEX;
use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Dotted numeric identity of a revision, e.g. `1.4` on the trunk or `1.4.2.3` on a branch.
///
/// Segments come in `(branch, minor)` pairs: the first pair names a trunk revision, every
/// following pair forks a branch off the revision named by everything before it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RevisionPath(Vec<u32>);

impl RevisionPath {
    pub fn try_parse(revision: &str) -> anyhow::Result<Self> {
        let re = regex::Regex::new(REVISION_PATH_REGEX)
            .with_context(|| format!("invalid revision path regex: {REVISION_PATH_REGEX}"))?;

        if !re.is_match(revision) {
            anyhow::bail!("invalid revision path: {}", revision);
        }

        let segments = revision
            .split('.')
            .map(|segment| {
                segment
                    .parse::<u32>()
                    .with_context(|| format!("revision segment out of range in {revision}"))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        Ok(Self(segments))
    }

    pub fn segments(&self) -> &[u32] {
        &self.0
    }

    /// Number of branch hops from the trunk; 0 means the revision lives on the trunk.
    pub fn depth(&self) -> usize {
        (self.0.len() - 2) / 2
    }

    pub fn is_trunk(&self) -> bool {
        self.depth() == 0
    }

    /// Minor number of the trunk revision this lineage is attached to.
    pub fn trunk_minor_number(&self) -> u32 {
        self.0[1]
    }

    pub fn minor_number(&self) -> u32 {
        self.0[self.0.len() - 1]
    }

    /// The path with its last segment dropped, i.e. the identity of the line it lives on.
    pub fn branch_path(&self) -> String {
        self.0[..self.0.len() - 1]
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(".")
    }

    /// Whether `self` is a strict ancestor of `other` in the branch tree.
    pub fn is_ancestor_of(&self, other: &RevisionPath) -> bool {
        let len = self.0.len();
        if self == other || other.0.len() < len {
            return false;
        }

        let (prefix, minor) = (&self.0[..len - 1], self.minor_number());
        if other.0[..len - 1] != *prefix {
            return false;
        }

        let fork_point = other.0[len - 1];
        if other.0.len() == len {
            minor < fork_point
        } else {
            minor <= fork_point
        }
    }
}

impl std::str::FromStr for RevisionPath {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_parse(s)
    }
}

impl TryFrom<String> for RevisionPath {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_parse(&value)
    }
}

impl From<RevisionPath> for String {
    fn from(path: RevisionPath) -> Self {
        path.to_string()
    }
}

impl std::fmt::Display for RevisionPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let dotted = self
            .0
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(".");
        write!(f, "{}", dotted)
    }
}
