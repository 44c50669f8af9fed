use crate::artifacts::entity::FileEntity;
use crate::artifacts::entity::workfile_status::WorkfileStatus;
use crate::artifacts::revision::label::Label;
use crate::artifacts::revision::revision_node::{RevisionMap, RevisionNode, revision_map};
use derive_new::new;
use serde::{Deserialize, Serialize};

/// Archive contents of a controlled file: its labels and its revisions in storage order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct ArchiveRecord {
    #[serde(default)]
    labels: Vec<Label>,
    #[serde(default)]
    revisions: Vec<RevisionNode>,
}

impl ArchiveRecord {
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn revisions(&self) -> &[RevisionNode] {
        &self.revisions
    }
}

/// Plain-data file entity, as read from a JSON file list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct FileRecord {
    short_name: String,
    #[new(default)]
    #[serde(default)]
    project: String,
    #[new(default)]
    #[serde(default)]
    ignore_case: bool,
    #[new(default)]
    #[serde(default)]
    workfile_size: Option<u64>,
    #[new(default)]
    #[serde(default)]
    lock_holder: Option<String>,
    #[new(default)]
    #[serde(default)]
    last_editor: Option<String>,
    #[new(default)]
    #[serde(default)]
    status: WorkfileStatus,
    #[new(default)]
    #[serde(default)]
    obsolete: bool,
    #[new(default)]
    #[serde(default)]
    archive: Option<ArchiveRecord>,
}

impl FileRecord {
    pub fn with_project(mut self, project: impl Into<String>, ignore_case: bool) -> Self {
        self.project = project.into();
        self.ignore_case = ignore_case;
        self
    }

    pub fn with_workfile_size(mut self, size: u64) -> Self {
        self.workfile_size = Some(size);
        self
    }

    pub fn with_lock_holder(mut self, lock_holder: impl Into<String>) -> Self {
        self.lock_holder = Some(lock_holder.into());
        self
    }

    pub fn with_last_editor(mut self, editor: impl Into<String>) -> Self {
        self.last_editor = Some(editor.into());
        self
    }

    pub fn with_status(mut self, status: WorkfileStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_obsolete(mut self, obsolete: bool) -> Self {
        self.obsolete = obsolete;
        self
    }

    pub fn with_archive(mut self, archive: ArchiveRecord) -> Self {
        self.archive = Some(archive);
        self
    }

    pub fn archive(&self) -> Option<&ArchiveRecord> {
        self.archive.as_ref()
    }
}

impl FileEntity for FileRecord {
    fn short_name(&self) -> &str {
        &self.short_name
    }

    fn project_name(&self) -> &str {
        &self.project
    }

    fn ignore_case(&self) -> bool {
        self.ignore_case
    }

    fn workfile_size(&self) -> Option<u64> {
        self.workfile_size
    }

    fn lock_holder(&self) -> Option<&str> {
        self.lock_holder.as_deref()
    }

    fn last_editor(&self) -> Option<&str> {
        self.last_editor.as_deref()
    }

    fn status(&self) -> WorkfileStatus {
        self.status
    }

    fn is_obsolete(&self) -> bool {
        self.obsolete
    }

    fn has_archive(&self) -> bool {
        self.archive.is_some()
    }

    fn labels(&self) -> &[Label] {
        self.archive
            .as_ref()
            .map(ArchiveRecord::labels)
            .unwrap_or_default()
    }

    fn revisions(&self) -> RevisionMap {
        self.archive
            .as_ref()
            .map(|archive| revision_map(archive.revisions.iter().cloned()))
            .unwrap_or_default()
    }
}
