use crate::areas::repository::Repository;
use crate::artifacts::branch::DEFAULT_BRANCH;
use crate::artifacts::branch::branch_name::BranchName;
use anyhow::Context;
use std::fs;
use std::io::Write;

impl Repository {
    /// Create the `.rowbit` layout; an existing HEAD is left alone
    pub fn init_layout(&self) -> anyhow::Result<()> {
        fs::create_dir_all(self.database().objects_path())
            .context("Failed to create .rowbit/objects directory")?;

        fs::create_dir_all(self.refs().heads_path())
            .context("Failed to create .rowbit/refs/heads directory")?;

        fs::create_dir_all(self.refs().remotes_path())
            .context("Failed to create .rowbit/refs/remotes directory")?;

        if !self.refs().head_path().exists() {
            let default_branch = BranchName::try_parse(DEFAULT_BRANCH.to_string())?;
            self.refs()
                .set_head(&default_branch)
                .context("Failed to create initial HEAD reference")?;
        }

        Ok(())
    }

    pub fn init(&self) -> anyhow::Result<()> {
        self.init_layout()?;

        writeln!(
            self.writer(),
            "Initialized empty rowbit repository in {}",
            self.rowbit_path().display()
        )?;

        Ok(())
    }
}
