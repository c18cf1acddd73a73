//! Core utilities and shared types
//!
//! This module contains shared utilities used across the application.

pub mod errors;

/// Downcast an `anyhow::Error` to a [`errors::RepoError`] kind, if it carries one.
pub fn repo_error(error: &anyhow::Error) -> Option<&errors::RepoError> {
    error.downcast_ref::<errors::RepoError>()
}
