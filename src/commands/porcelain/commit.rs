use crate::areas::repository::Repository;
use crate::artifacts::commit::builder::CommitOutcome;
use crate::artifacts::commit::policy::CommitArgs;
use crate::artifacts::session::Session;
use std::io::Write;

impl Repository {
    /// Print the new commit hash, or nothing when the commit was skipped
    pub async fn commit(&self, session: &Session, args: &CommitArgs) -> anyhow::Result<()> {
        if let CommitOutcome::Created(oid) = self.build_and_write_commit(session, args).await? {
            writeln!(self.writer(), "{oid}")?;
        }

        Ok(())
    }
}
