use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::SymRefName;
use crate::artifacts::branch::revision::Revision;
use crate::artifacts::core::errors::RepoError;

impl Repository {
    /// Point `reference` (a full `refs/...` path) at the commit `revision` names
    pub fn update_ref(&self, reference: &str, revision: &str) -> anyhow::Result<()> {
        if !reference.starts_with("refs/") || reference.contains("..") {
            return Err(RepoError::invalid_argument(format!(
                "refusing to update ref with bad name '{reference}'"
            ))
            .into());
        }

        let oid = Revision::try_parse(revision)?.resolve_commit(self)?;
        let reference = SymRefName::new(reference.to_string());
        self.refs().update_ref(&reference, &oid)?;
        tracing::debug!(%reference, %oid, "updated ref");

        Ok(())
    }
}
