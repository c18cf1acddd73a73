//! Plumbing commands (low-level operations)
//!
//! ## Commands
//!
//! - `update-ref`: Point a ref at a commit, e.g. to record a remote-tracking tip

pub mod update_ref;
