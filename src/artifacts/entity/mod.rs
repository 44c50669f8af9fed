//! File entities as seen by the filter engine
//!
//! The engine never owns files: it reads them through [`FileEntity`], which the surrounding
//! client implements over its archive and workfile abstractions. [`FileRecord`] is a plain
//! data implementation used by the command-line front end and the tests.

pub mod file_record;
pub mod workfile_status;

use crate::artifacts::revision::label::Label;
use crate::artifacts::revision::revision_node::RevisionMap;
use workfile_status::WorkfileStatus;

/// Lifecycle of a file within its project
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileLifecycle {
    /// Controlled and live
    Active,
    /// Controlled, but marked obsolete
    Obsolete,
    /// A workfile with no archive behind it
    Uncontrolled,
}

pub trait FileEntity {
    fn short_name(&self) -> &str;

    /// Name of the project the file belongs to.
    fn project_name(&self) -> &str;

    /// Whether the owning project compares file names case-insensitively.
    fn ignore_case(&self) -> bool;

    /// Size of the workfile, `None` when there is no workfile.
    fn workfile_size(&self) -> Option<u64>;

    fn lock_holder(&self) -> Option<&str>;

    fn last_editor(&self) -> Option<&str>;

    fn status(&self) -> WorkfileStatus;

    fn is_obsolete(&self) -> bool;

    fn has_archive(&self) -> bool;

    /// Labels applied to the file's archive; empty without an archive.
    fn labels(&self) -> &[Label];

    /// The archive's revisions keyed by archive index; empty without an archive.
    ///
    /// Built on demand since reading revision detail is the expensive part of a file.
    fn revisions(&self) -> RevisionMap;

    fn lifecycle(&self) -> FileLifecycle {
        if !self.has_archive() {
            FileLifecycle::Uncontrolled
        } else if self.is_obsolete() {
            FileLifecycle::Obsolete
        } else {
            FileLifecycle::Active
        }
    }
}
