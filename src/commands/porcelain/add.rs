use crate::areas::repository::Repository;
use crate::areas::transaction::TransactionMode;

impl Repository {
    /// Stage the named tables, or every table for `.`
    pub async fn add(&self, tables: &[String]) -> anyhow::Result<()> {
        let branch = self.refs().current_branch()?;
        let transaction = self.begin_transaction(&branch, TransactionMode::Write).await?;
        let roots = transaction.get_roots()?;
        let working_sets = transaction.working_sets();

        let roots = if tables.iter().any(|table| table == ".") {
            working_sets.stage_all_tables(roots)
        } else {
            working_sets.stage_tables(self.database(), roots, tables)?
        };
        transaction.save_roots(&roots)?;

        Ok(())
    }
}
