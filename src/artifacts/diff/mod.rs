//! Table-level comparison of root snapshots
//!
//! - `root_diff`: which tables were added, modified or deleted between two roots

pub mod root_diff;
