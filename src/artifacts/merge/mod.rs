//! Commit graph algorithms shared by status and commit
//!
//! - `bca_finder`: best common ancestor of two commits

pub mod bca_finder;
