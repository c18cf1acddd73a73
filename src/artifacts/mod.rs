//! Domain types and algorithms
//!
//! - `branch`: Branch names and revision parsing
//! - `commit`: Commit policies, pending commits and the commit builder
//! - `core`: Shared error kinds
//! - `diff`: Table-level root comparison
//! - `log`: Topological commit walks
//! - `merge`: Best common ancestor search
//! - `objects`: Object types (table, root, commit)
//! - `session`: Caller identity and permissions
//! - `status`: Branch status and upstream divergence

pub mod branch;
pub mod commit;
pub mod core;
pub mod diff;
pub mod log;
pub mod merge;
pub mod objects;
pub mod session;
pub mod status;
