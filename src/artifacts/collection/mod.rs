//! Named filter collections
//!
//! - `filter_collection`: an ordered, lock-protected list of filters with a name, a scope and
//!   a built-in flag
//! - `collection_scope`: whether a collection applies to one project or to all of them

pub mod collection_scope;
pub mod filter_collection;

pub const ALL_FILES_COLLECTION: &str = "All files";
