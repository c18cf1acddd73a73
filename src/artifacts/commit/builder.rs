use crate::areas::repository::Repository;
use crate::areas::transaction::TransactionMode;
use crate::artifacts::commit::policy::{CommitArgs, CommitPolicy, StagingMode};
use crate::artifacts::core::errors::RepoError;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::session::Session;
use anyhow::Context;

/// Result of a commit invocation; skipping is a success
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    Created(ObjectId),
    Skipped,
}

impl CommitOutcome {
    pub fn hash(&self) -> Option<&ObjectId> {
        match self {
            CommitOutcome::Created(oid) => Some(oid),
            CommitOutcome::Skipped => None,
        }
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, CommitOutcome::Skipped)
    }
}

impl Repository {
    /// Stage, resolve metadata and write one commit on the current branch
    pub async fn build_and_write_commit(
        &self,
        session: &Session,
        args: &CommitArgs,
    ) -> anyhow::Result<CommitOutcome> {
        let branch = self
            .refs()
            .current_branch()
            .context("cannot commit on a detached HEAD")?;
        session.check_write_access(&self.config()?, &branch)?;

        let mut transaction = self.begin_transaction(&branch, TransactionMode::Write).await?;
        let roots = transaction.get_roots()?;

        let working_sets = transaction.working_sets();
        let roots = match args.staging_mode() {
            StagingMode::StageAll => working_sets.stage_all_tables(roots),
            StagingMode::StageModifiedAndDeleted => {
                working_sets.stage_modified_and_deleted_tables(self.database(), roots)?
            }
            StagingMode::None => roots,
        };

        let policy = CommitPolicy::resolve(args, session, || transaction.head_message())?;

        let Some(pending) = transaction.new_pending_commit(&policy, roots)? else {
            if policy.skip_empty {
                tracing::info!(%branch, "nothing staged, skipping commit");
                return Ok(CommitOutcome::Skipped);
            }
            return Err(RepoError::NothingToCommit.into());
        };

        let (oid, _) = transaction
            .write_commit(pending)
            .with_context(|| format!("failed to commit on branch {branch}"))?;

        Ok(CommitOutcome::Created(oid))
    }
}
