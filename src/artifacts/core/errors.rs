use thiserror::Error;

/// Error kinds callers may need to tell apart.
///
/// Everything else travels as a plain `anyhow::Error` with context attached.
/// Use [`super::repo_error`] (or `downcast_ref`) to recover the kind after
/// context has been added.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepoError {
    #[error("not a rowbit repository (missing .rowbit/)")]
    NotARepository,

    #[error("user '{user}' does not have write permission on branch '{branch}'")]
    AccessDenied { user: String, branch: String },

    #[error("{0}")]
    InvalidArgument(String),

    #[error("Must provide commit message.")]
    MissingCommitMessage,

    #[error("nothing to commit")]
    NothingToCommit,

    #[error("no match found to ancestor commit {ancestor} walking from {start}")]
    AncestryInconsistency { start: String, ancestor: String },

    #[error("commits {0} and {1} have no common ancestor")]
    NoCommonAncestor(String, String),

    #[error("branch '{branch}' moved from {expected} to {actual} during the transaction")]
    Conflict {
        branch: String,
        expected: String,
        actual: String,
    },

    #[error("amending {0} would rewrite history already present upstream (use --force)")]
    NonFastForward(String),

    #[error("operation cancelled")]
    Cancelled,
}

impl RepoError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        RepoError::InvalidArgument(message.into())
    }
}
