//! Procedure entry points
//!
//! Procedures take their arguments as strings, like a stored procedure
//! called from a query, and return result rows instead of printing.
//!
//! - `commit`: one row holding the new commit hash, no rows when skipped
//! - `commit_hash_out`: same rows, and the hash is also written to an out
//!   parameter (left untouched when skipped)

pub mod commit;

use crate::areas::repository::Repository;
use crate::artifacts::core::errors::RepoError;
use crate::artifacts::session::Session;

pub type Row = Vec<String>;

/// Run a procedure by name
pub async fn call(
    repository: &Repository,
    session: &Session,
    procedure: &str,
    args: &[String],
) -> anyhow::Result<Vec<Row>> {
    match procedure {
        "commit" => commit::commit(repository, session, args).await,
        "commit_hash_out" => {
            let mut out = String::new();
            let rows = commit::commit_hash_out(repository, session, &mut out, args).await?;
            tracing::debug!(out = %out, "commit_hash_out returned");
            Ok(rows)
        }
        unknown => Err(RepoError::invalid_argument(format!("unknown procedure '{unknown}'")).into()),
    }
}
