//! Data types and algorithms of the filter engine
//!
//! - `revision`: revision paths, revision nodes, labels and ordering relative to a label
//! - `entity`: the file abstraction filters are evaluated against
//! - `filter`: filter kinds, compiled criteria and the filter factory
//! - `collection`: named, scoped collections of filters

pub mod collection;
pub mod entity;
pub mod filter;
pub mod revision;
