//! Filter evaluation for a version-control client
//!
//! Decides which files, and which revisions of a branched and labeled history, a named
//! collection of filters lets through:
//!
//! - `artifacts`: revisions, labels, file entities, filters and filter collections
//! - `areas`: the evaluator, collection persistence, settings and the command workbench
//! - `commands`: the command-line operations, implemented on the workbench

pub mod areas;
pub mod artifacts;
pub mod commands;
