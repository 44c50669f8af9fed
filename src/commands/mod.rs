//! Command implementations
//!
//! Every command is a method on [`Workbench`](crate::areas::workbench::Workbench):
//!
//! - `collections`: listing, showing, creating, copying and deleting collections
//! - `filters`: the filter kinds and editing the filters of a collection
//! - `evaluate`: running a collection against a list of files

pub mod collections;
pub mod evaluate;
pub mod filters;
