use crate::areas::repository::Repository;
use crate::artifacts::branch::revision::Revision;
use crate::artifacts::log::rev_list::RevList;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use colored::Colorize;
use std::io::Write;
use tokio_util::sync::CancellationToken;

impl Repository {
    /// Print the history of `revision` (HEAD by default), newest first
    pub fn log(&self, revision: Option<&str>, cancel: &CancellationToken) -> anyhow::Result<()> {
        let revision = Revision::try_parse(revision.unwrap_or("HEAD"))?;
        let Some(start) = revision.resolve(self)? else {
            let branch = self.refs().current_branch()?;
            anyhow::bail!(
                "your current branch '{}' does not have any commits yet",
                branch
            );
        };

        for commit in RevList::new(self.commit_loader(cancel), [start]) {
            let oid = commit?.oid;
            let commit = self.database().load_commit(&oid)?;
            self.show_commit_medium(&oid, &commit)?;
        }

        Ok(())
    }

    fn show_commit_medium(&self, oid: &ObjectId, commit: &Commit) -> anyhow::Result<()> {
        writeln!(self.writer(), "{}", format!("commit {oid}").yellow())?;
        if commit.parents().len() > 1 {
            let parents = commit
                .parents()
                .iter()
                .map(ObjectId::to_short_oid)
                .collect::<Vec<_>>()
                .join(" ");
            writeln!(self.writer(), "Merge: {parents}")?;
        }
        writeln!(self.writer(), "Author: {}", commit.author().display_name())?;
        writeln!(
            self.writer(),
            "Date:   {}",
            commit.author().readable_timestamp()
        )?;
        writeln!(self.writer())?;
        for message_line in commit.message().lines() {
            writeln!(self.writer(), "    {message_line}")?;
        }
        writeln!(self.writer())?;

        Ok(())
    }
}
