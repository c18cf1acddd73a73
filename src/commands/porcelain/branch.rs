use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::branch::revision::Revision;
use crate::artifacts::core::errors::RepoError;
use colored::Colorize;
use std::io::Write;

impl Repository {
    pub fn create_branch(&self, branch_name: &str, start: Option<&str>) -> anyhow::Result<()> {
        let branch_name = BranchName::try_parse(branch_name.to_string())?;

        let source_oid = match start {
            Some(start) => Some(Revision::try_parse(start)?.resolve_commit(self)?),
            None => self.refs().read_head()?,
        }
        .ok_or_else(|| anyhow::anyhow!("no current HEAD to branch from"))?;

        self.refs().create_branch(&branch_name, &source_oid)?;
        tracing::info!(branch = %branch_name, start = %source_oid, "created branch");

        Ok(())
    }

    pub fn list_branches(&self) -> anyhow::Result<()> {
        let current = self.refs().current_ref(None)?;

        for branch in self.refs().list_branches()? {
            if branch == current {
                writeln!(self.writer(), "* {}", branch.short_name().green())?;
            } else {
                writeln!(self.writer(), "  {}", branch.short_name())?;
            }
        }

        Ok(())
    }

    /// Track `<remote>/<branch>` from a local branch
    pub fn set_upstream(&self, branch: &str, upstream: &str) -> anyhow::Result<()> {
        let branch = BranchName::try_parse(branch.to_string())?;
        let (remote, remote_branch) = upstream.split_once('/').ok_or_else(|| {
            RepoError::invalid_argument(format!(
                "upstream must be written as <remote>/<branch>, got '{upstream}'"
            ))
        })?;
        let remote_branch = BranchName::try_parse(remote_branch.to_string())?;

        let mut config = self.config()?;
        if config.remote(remote)?.is_none() {
            return Err(
                RepoError::invalid_argument(format!("remote '{remote}' does not exist")).into(),
            );
        }
        config.set_upstream(&branch, remote, &remote_branch);
        self.save_config(&config)?;

        writeln!(
            self.writer(),
            "branch '{branch}' set up to track '{remote}/{remote_branch}'."
        )?;

        Ok(())
    }
}
