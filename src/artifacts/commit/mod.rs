//! Commit creation
//!
//! - `metadata`: parsing of `--author` and `--date`
//! - `policy`: commit flags and their resolution against a session
//! - `pending`: a computed, not yet written commit
//! - `builder`: the single entry point both invoking surfaces go through

pub mod builder;
pub mod metadata;
pub mod pending;
pub mod policy;
