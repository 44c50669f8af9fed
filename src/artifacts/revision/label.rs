use crate::artifacts::revision::revision_path::RevisionPath;
use derive_new::new;
use serde::{Deserialize, Serialize};

/// A named pointer at a revision of one file.
///
/// Floating labels follow the tip of their branch as revisions are added; fixed labels stay
/// on the revision they were applied to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, new)]
pub struct Label {
    name: String,
    revision: RevisionPath,
    #[new(default)]
    #[serde(default)]
    floating: bool,
}

impl Label {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn revision(&self) -> &RevisionPath {
        &self.revision
    }

    pub fn is_floating(&self) -> bool {
        self.floating
    }
}

/// Look a label up by name; names are unique per file.
pub fn find_label<'l>(labels: &'l [Label], name: &str) -> Option<&'l Label> {
    labels.iter().find(|label| label.name() == name)
}
