use crate::artifacts::revision::revision_path::RevisionPath;
use chrono::{DateTime, Utc};
use derive_new::new;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A file's stored revisions keyed by archive index.
///
/// Indices follow the archive's storage order, which is chronological within a branch but
/// not across branches.
pub type RevisionMap = BTreeMap<usize, RevisionNode>;

/// One stored revision of a file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct RevisionNode {
    path: RevisionPath,
    checked_in: DateTime<Utc>,
    editor: String,
    #[new(default)]
    #[serde(default)]
    lock_holder: Option<String>,
    #[new(default)]
    #[serde(default)]
    description: String,
    #[new(default)]
    #[serde(default)]
    labels: Vec<String>,
}

impl RevisionNode {
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_lock_holder(mut self, lock_holder: impl Into<String>) -> Self {
        self.lock_holder = Some(lock_holder.into());
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.labels.push(label.into());
        self
    }

    pub fn path(&self) -> &RevisionPath {
        &self.path
    }

    pub fn depth(&self) -> usize {
        self.path.depth()
    }

    pub fn trunk_minor_number(&self) -> u32 {
        self.path.trunk_minor_number()
    }

    pub fn checked_in(&self) -> DateTime<Utc> {
        self.checked_in
    }

    pub fn editor(&self) -> &str {
        &self.editor
    }

    pub fn lock_holder(&self) -> Option<&str> {
        self.lock_holder.as_deref()
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }
}

/// A revision together with its archive index
#[derive(Debug, Clone, Copy, PartialEq, Eq, new)]
pub struct RevisionRef<'r> {
    pub index: usize,
    pub node: &'r RevisionNode,
}

impl<'r> RevisionRef<'r> {
    pub fn path(&self) -> &'r RevisionPath {
        self.node.path()
    }

    pub fn depth(&self) -> usize {
        self.node.depth()
    }
}

/// Build an ordered revision map from revisions listed in archive order.
pub fn revision_map(revisions: impl IntoIterator<Item = RevisionNode>) -> RevisionMap {
    revisions.into_iter().enumerate().collect()
}

/// Find a revision in the map by its dotted path.
pub fn find_revision<'r>(
    revisions: &'r RevisionMap,
    path: &RevisionPath,
) -> Option<RevisionRef<'r>> {
    revisions
        .iter()
        .find(|(_, node)| node.path() == path)
        .map(|(index, node)| RevisionRef::new(*index, node))
}
