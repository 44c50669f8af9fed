//! Engine services
//!
//! - `config`: settings resolved from the environment and command-line flags
//! - `evaluator`: applying filter collections to files and their revisions
//! - `filter_store`: the keyed set of collections and its JSON persistence
//! - `workbench`: the context the command-line front end runs its commands on

pub mod config;
pub mod evaluator;
pub mod filter_store;
pub mod workbench;
