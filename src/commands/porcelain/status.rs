use crate::areas::repository::Repository;
use crate::artifacts::status::status_info::{ChangeSet, StatusInfo};
use crate::artifacts::status::tracking::tracking_message;
use colored::{ColoredString, Colorize};
use std::io::Write;
use tokio_util::sync::CancellationToken;

const LABEL_WIDTH: usize = 12;

impl Repository {
    pub async fn status(&self, cancel: &CancellationToken) -> anyhow::Result<()> {
        let info = self.status_info(cancel).await?;
        self.print_status(&info)
    }

    fn print_status(&self, info: &StatusInfo) -> anyhow::Result<()> {
        writeln!(self.writer(), "On branch {}", info.branch)?;

        if let Some(tracking) = &info.tracking {
            writeln!(
                self.writer(),
                "{}",
                tracking_message(&tracking.upstream, &tracking.divergence)
            )?;
        }
        if info.head.is_none() {
            writeln!(self.writer(), "\nNo commits yet")?;
        }

        if !info.staged.is_empty() {
            writeln!(self.writer(), "\nChanges to be committed:")?;
            self.print_changes(&info.staged, |label| label.green())?;
        }
        if !info.unstaged.is_empty() {
            writeln!(self.writer(), "\nChanges not staged for commit:")?;
            writeln!(
                self.writer(),
                "  (use \"rowbit add <table>\" to update what will be committed)"
            )?;
            self.print_changes(&info.unstaged, |label| label.red())?;
        }
        if !info.untracked.is_empty() {
            writeln!(self.writer(), "\nUntracked tables:")?;
            writeln!(
                self.writer(),
                "  (use \"rowbit add <table>\" to include in what will be committed)"
            )?;
            for table in &info.untracked {
                writeln!(self.writer(), "\t{}", table.red())?;
            }
        }

        if info.is_clean() {
            writeln!(self.writer(), "nothing to commit, working tree clean")?;
        } else if info.staged.is_empty() {
            writeln!(
                self.writer(),
                "\nno changes added to commit (use \"rowbit add\" and/or \"rowbit commit -a\")"
            )?;
        }

        Ok(())
    }

    fn print_changes(
        &self,
        changes: &ChangeSet,
        paint: impl Fn(&str) -> ColoredString,
    ) -> anyhow::Result<()> {
        for (table, change) in changes {
            let line = format!("{:<width$}{}", change.label(), table, width = LABEL_WIDTH);
            writeln!(self.writer(), "\t{}", paint(&line))?;
        }

        Ok(())
    }
}
