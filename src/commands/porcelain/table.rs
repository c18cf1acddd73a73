use crate::areas::repository::Repository;
use crate::areas::transaction::TransactionMode;
use crate::artifacts::objects::root_tree::RootTree;
use crate::artifacts::objects::table::Table;
use anyhow::Context;
use std::io::Write;
use std::path::Path;

impl Repository {
    /// Load a CSV file into the working root as table `name`
    pub async fn import_table(&self, name: &str, file: &Path) -> anyhow::Result<()> {
        RootTree::validate_table_name(name)?;
        let content = std::fs::read_to_string(file)
            .with_context(|| format!("unable to read {}", file.display()))?;
        let table = Table::from_csv(&content)
            .with_context(|| format!("invalid table data in {}", file.display()))?;
        let row_count = table.rows().len();

        let branch = self.refs().current_branch()?;
        let transaction = self.begin_transaction(&branch, TransactionMode::Write).await?;
        let table_oid = self.database().store(&table)?;
        let roots = transaction.working_sets().edit_working(
            self.database(),
            transaction.get_roots()?,
            |root| root.with_table(name, table_oid),
        )?;
        transaction.save_roots(&roots)?;

        tracing::info!(%branch, table = name, rows = row_count, "imported table");
        writeln!(self.writer(), "Imported {row_count} rows into table '{name}'")?;

        Ok(())
    }

    /// Remove table `name` from the working root
    pub async fn drop_table(&self, name: &str) -> anyhow::Result<()> {
        let branch = self.refs().current_branch()?;
        let transaction = self.begin_transaction(&branch, TransactionMode::Write).await?;
        let roots = transaction.working_sets().edit_working(
            self.database(),
            transaction.get_roots()?,
            |root| {
                if !root.contains(name) {
                    anyhow::bail!("table '{}' does not exist", name);
                }
                Ok(root.without_table(name))
            },
        )?;
        transaction.save_roots(&roots)?;

        writeln!(self.writer(), "Dropped table '{name}'")?;

        Ok(())
    }
}
