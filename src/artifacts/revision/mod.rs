//! Revision history model
//!
//! Read-only view of a file's stored revisions as the filter engine sees them:
//!
//! - `revision_path`: dotted numeric revision identities (`1.4.2.3`)
//! - `revision_node`: one stored revision and the ordered revision map
//! - `label`: named pointers at revisions
//! - `label_ordering`: positioning a revision relative to a labeled revision

pub mod label;
pub mod label_ordering;
pub mod revision_node;
pub mod revision_path;

pub const REVISION_PATH_REGEX: &str = r"^\d+\.\d+(\.\d+\.\d+)*$";
