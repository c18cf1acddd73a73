//! On-disk repository areas
//!
//! Everything lives under `.rowbit/`:
//!
//! - `config`: Remotes, upstreams and branch write permissions
//! - `database`: Content-addressed object store for tables, roots and commits
//! - `refs`: Branches, remote-tracking branches and HEAD
//! - `working_set`: Per-branch working and staged roots
//! - `transaction`: Locked read/write access to one branch
//! - `repository`: Ties the areas together

pub mod config;
pub mod database;
pub mod refs;
pub mod repository;
pub mod transaction;
pub mod working_set;
