//! rowbit: version control for tabular data
//!
//! A repository stores named tables. Every commit snapshots the whole set of
//! tables under a single root, and commits form a DAG linked by parent ids.
//!
//! - `areas`: on-disk repository areas (objects, refs, working sets, config)
//! - `artifacts`: domain types and algorithms (commits, ancestry, divergence)
//! - `commands`: CLI and procedure entry points

pub mod areas;
pub mod artifacts;
pub mod commands;

pub use artifacts::core::errors::RepoError;
