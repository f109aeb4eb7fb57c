//! CLI command implementations

pub mod completions;
pub mod conformance;
pub mod list;
pub mod seed;
pub mod show;
