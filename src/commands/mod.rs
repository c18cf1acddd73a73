//! Command implementations
//!
//! - `plumbing`: Low-level commands for direct ref manipulation
//! - `porcelain`: User-facing commands (init, add, commit, status, ...)
//! - `procedures`: Procedure entry points returning rows instead of printing
//!
//! Porcelain and plumbing commands are `impl Repository` blocks that write to
//! the repository writer.

pub mod plumbing;
pub mod porcelain;
pub mod procedures;
