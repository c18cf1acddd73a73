//! Commit history traversal
//!
//! `rev_list` walks the commit DAG in topological order using a max-heap
//! ordered by height, then timestamp, then id. Commits are loaded lazily,
//! so callers that stop early never read the rest of the history.

pub mod rev_list;
